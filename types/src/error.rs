use thiserror::Error;

/// Errors raised while building a [`DataType`](crate::DataType)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataTypeError {
    /// An argument that should be an integer is not one
    #[error("`{field}` expects an integer, got `{value}`")]
    InvalidArgument { field: &'static str, value: String },

    /// An integer argument is outside its allowed range
    #[error("`{field}` must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A field is set while the field it depends on is not
    #[error("`{field}` cannot be set without `{requires}`")]
    MissingArgument {
        field: &'static str,
        requires: &'static str,
    },

    /// A mapping field holds a value of the wrong JSON type
    #[error("`{field}` expects {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// The value is neither a type phrase nor a mapping
    #[error("cannot build a data type from a {0} value")]
    UnsupportedValue(&'static str),
}

/// Name of a JSON value's kind, for error messages
#[must_use]
pub fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "mapping",
    }
}
