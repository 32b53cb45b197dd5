//! # armored
//!
//! Parse compact column-definition phrases and structured mappings into
//! validated column, table and data type models.
//!
//! ## Quick Start
//!
//! ```rust
//! use armored::prelude::*;
//!
//! let settings = ColumnSettings::default();
//! let column = Column::parse(
//!     "title",
//!     "varchar( 100 ) not null default 'Untitled' check( length(<name>) > 0 )",
//!     &settings,
//! )
//! .unwrap();
//!
//! assert_eq!(column.dtype(), &DataType::Varchar { max_length: 100 });
//! assert_eq!(column.default().map(|d| d.to_string()).as_deref(), Some("'Untitled'"));
//! assert!(!column.nullable());
//! ```
//!
//! ## Crates
//!
//! | Crate           | Contents                                       |
//! |-----------------|------------------------------------------------|
//! | `armored-types` | `DataType`, key constraints, lexical helpers   |
//! | `armored-core`  | phrase pipeline, `Column`, `Table`, settings   |

pub use armored_core::{column, config, error, table};
pub use armored_core::{
    Column, ColumnError, ColumnSettings, ConfigError, DefaultValue, FieldSet, ParsedPhrase,
    PkNullablePolicy, Settings, Table, TableError, normalize, parse_phrase, validate,
};
pub use armored_types::{
    DataType, DataTypeError, ForeignKey, PrimaryKey, Reference, lexical, name_for_fk, name_for_pk,
};

/// Prelude module for commonly used types
pub mod prelude {
    pub use armored_core::prelude::*;
    pub use armored_types::prelude::*;
}
