//! Shared type definitions for armored
//!
//! This crate provides the value types the column parser builds on:
//!
//! - [`DataType`] - the closed set of column data types
//! - [`Reference`], [`PrimaryKey`], [`ForeignKey`] - key constraint types
//! - [`lexical`] - phrase-level string helpers (keyword extraction,
//!   nullability markers, alias selection, type phrase decomposition)

mod constraint;
mod dtype;
mod error;
pub mod lexical;
pub mod serde_helpers;

pub use constraint::{ForeignKey, PrimaryKey, Reference, name_for_fk, name_for_pk};
pub use dtype::{BASE_TAG, DataType, MAX_TIMESTAMP_PRECISION, UNSET};
pub use error::{DataTypeError, value_kind};

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::lexical::Nullability;
    pub use crate::{DataType, DataTypeError, ForeignKey, PrimaryKey, Reference};
}
