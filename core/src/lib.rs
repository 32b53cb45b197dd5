//! Column-definition parsing and validation
//!
//! - [`column`] - phrase pipeline, two-phase construction and [`Column`]
//! - [`table`] - [`Table`] with derived key constraints
//! - [`config`] - [`Settings`](config::Settings) loaded from `armored.toml`

pub mod column;
pub mod config;
pub mod error;
pub mod table;
mod trace;

pub use column::{Column, DefaultValue, FieldSet, ParsedPhrase, normalize, parse_phrase, validate};
pub use config::{ColumnSettings, PkNullablePolicy, Settings};
pub use error::{ColumnError, ConfigError, TableError};
pub use table::Table;

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::column::{Column, DefaultValue, FieldSet};
    pub use crate::config::{ColumnSettings, PkNullablePolicy};
    pub use crate::error::{ColumnError, TableError};
    pub use crate::table::Table;
}
