use armored_types::DataTypeError;
use thiserror::Error;

/// Errors raised while building a [`Column`](crate::Column)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    /// `check` keyword present but not followed by a parenthesized clause
    #[error("datatype phrase does not support this format of check: `{0}`")]
    MalformedCheckClause(String),

    /// None of the accepted datatype aliases is present in the mapping
    #[error("datatype key not found, expected one of: {}", .aliases.join(", "))]
    MissingDatatypeKey { aliases: Vec<String> },

    /// The datatype value is neither a phrase nor a mapping
    #[error("datatype value must be a phrase or a mapping, got {0}")]
    UnsupportedDatatypeValueType(&'static str),

    /// `nullable` is true while a default is set
    #[error("`nullable` cannot be true if `default` is set")]
    ConflictingNullableDefault,

    /// `pk` and `nullable` are both true under the rejecting policy
    #[error("`pk` and `nullable` cannot be true together")]
    PkNullableConflict,

    /// A required field is absent
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field holds a value of the wrong kind
    #[error("`{field}` expects {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Column input that is not a mapping
    #[error("column input must be a mapping, got {0}")]
    NotAMapping(&'static str),

    /// The data type could not be built
    #[error(transparent)]
    DataType(#[from] DataTypeError),
}

/// Errors raised while building a [`Table`](crate::Table)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// One of the table's columns is invalid
    #[error("column #{index}: {source}")]
    Column { index: usize, source: ColumnError },

    /// Two columns share a name
    #[error("duplicate column `{0}`")]
    DuplicateColumn(String),

    /// A required field is absent
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field holds a value of the wrong kind
    #[error("`{field}` expects {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Table input that is not a mapping
    #[error("table input must be a mapping, got {0}")]
    NotAMapping(&'static str),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for column construction
pub type Result<T, E = ColumnError> = std::result::Result<T, E>;
