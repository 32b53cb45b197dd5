//! Column data types
//!
//! [`DataType`] is the closed set of types a column definition can carry. It
//! can be built from a type phrase (`varchar( 100 )`, `numeric(19, 2)`) or
//! from a mapping with a `type` tag, and renders back to its canonical phrase
//! through [`Display`](core::fmt::Display).
//!
//! # Examples
//!
//! ```
//! use armored_types::DataType;
//!
//! let dtype: DataType = "varchar( 100 )".parse().unwrap();
//! assert_eq!(dtype, DataType::Varchar { max_length: 100 });
//! assert_eq!(dtype.to_string(), "varchar( 100 )");
//! ```

use core::fmt;
use core::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{DataTypeError, value_kind};
use crate::lexical::decompose_type_phrase;

/// Sentinel for an unset length, precision or scale
pub const UNSET: i64 = -1;

/// Highest precision a `timestamp` accepts
pub const MAX_TIMESTAMP_PRECISION: i64 = 6;

/// Tag of the generic fallback variant
pub const BASE_TAG: &str = "base";

/// Enum representing supported column data types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Generic fallback; keeps the raw tag it was built from
    Base(String),

    /// Unbounded string unless `max_length` is set
    String { max_length: i64 },

    /// Fixed-length string
    Char { max_length: i64 },

    /// Variable-length string with limit
    Varchar { max_length: i64 },

    /// Variable unlimited length string
    Text,

    /// 4 bytes, -2147483648 to +2147483647
    Integer,

    /// 2 bytes, -32768 to +32767
    SmallInt,

    /// 8 bytes, -9223372036854775808 to +9223372036854775807
    BigInt,

    /// Exact numeric with selectable precision
    Numeric { precision: i64, scale: i64 },

    /// Same shape as [`DataType::Numeric`]
    Decimal { precision: i64, scale: i64 },

    /// Date and time, optionally with time zone
    Timestamp { precision: i64, timezone: bool },
}

impl Default for DataType {
    fn default() -> Self {
        Self::Base(BASE_TAG.to_string())
    }
}

// =============================================================================
// Variant resolution
// =============================================================================

type Constructor = fn(&Map<String, Value>) -> Result<DataType, DataTypeError>;

/// Variant resolution order. The first entry listing the mapping's `type`
/// builds the value, so `varchar` never falls into the plain string variant.
const VARIANTS: &[(&[&str], Constructor)] = &[
    (&["string", "str"], string_type),
    (&["char"], char_type),
    (&["varchar"], varchar_type),
    (&["text"], text_type),
    (&["integer", "int"], integer_type),
    (&["smallint"], smallint_type),
    (&["bigint"], bigint_type),
    (&["numeric"], numeric_type),
    (&["decimal"], decimal_type),
    (&["timestamp"], timestamp_type),
];

/// What an unrecognized tag turns into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fallback {
    /// Mapping input: `base` variant carrying the raw tag
    KeepTag,
    /// Phrase input: plain `base`
    Base,
}

fn resolve(map: &Map<String, Value>, fallback: Fallback) -> Result<DataType, DataTypeError> {
    let tag = match map.get("type") {
        None | Some(Value::Null) => return Ok(DataType::default()),
        Some(Value::String(tag)) => tag.as_str(),
        Some(_) => {
            return Err(DataTypeError::InvalidField {
                field: "type",
                expected: "a string",
            });
        }
    };

    if let Some((_, build)) = VARIANTS
        .iter()
        .find(|(tags, _)| tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    {
        return build(map);
    }

    Ok(match fallback {
        Fallback::KeepTag => DataType::Base(tag.to_string()),
        Fallback::Base => DataType::default(),
    })
}

fn int_field(map: &Map<String, Value>, field: &'static str) -> Result<i64, DataTypeError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(UNSET),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| DataTypeError::InvalidArgument {
            field,
            value: n.to_string(),
        }),
        Some(Value::String(s)) => {
            s.trim()
                .parse()
                .map_err(|_| DataTypeError::InvalidArgument {
                    field,
                    value: s.clone(),
                })
        }
        Some(_) => Err(DataTypeError::InvalidField {
            field,
            expected: "an integer",
        }),
    }
}

fn bounded(
    map: &Map<String, Value>,
    field: &'static str,
    max: i64,
) -> Result<i64, DataTypeError> {
    let value = int_field(map, field)?;
    if (UNSET..=max).contains(&value) {
        Ok(value)
    } else {
        Err(DataTypeError::OutOfRange {
            field,
            value,
            min: UNSET,
            max,
        })
    }
}

fn bool_field(map: &Map<String, Value>, field: &'static str) -> Result<bool, DataTypeError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(DataTypeError::InvalidField {
            field,
            expected: "a boolean",
        }),
    }
}

fn string_type(map: &Map<String, Value>) -> Result<DataType, DataTypeError> {
    Ok(DataType::String {
        max_length: bounded(map, "max_length", i64::MAX)?,
    })
}

fn char_type(map: &Map<String, Value>) -> Result<DataType, DataTypeError> {
    Ok(DataType::Char {
        max_length: bounded(map, "max_length", i64::MAX)?,
    })
}

fn varchar_type(map: &Map<String, Value>) -> Result<DataType, DataTypeError> {
    Ok(DataType::Varchar {
        max_length: bounded(map, "max_length", i64::MAX)?,
    })
}

fn text_type(_: &Map<String, Value>) -> Result<DataType, DataTypeError> {
    Ok(DataType::Text)
}

fn integer_type(_: &Map<String, Value>) -> Result<DataType, DataTypeError> {
    Ok(DataType::Integer)
}

fn smallint_type(_: &Map<String, Value>) -> Result<DataType, DataTypeError> {
    Ok(DataType::SmallInt)
}

fn bigint_type(_: &Map<String, Value>) -> Result<DataType, DataTypeError> {
    Ok(DataType::BigInt)
}

/// Precision and scale of an exact numeric; a scale needs a precision.
fn exact_numeric_shape(map: &Map<String, Value>) -> Result<(i64, i64), DataTypeError> {
    let precision = bounded(map, "precision", i64::MAX)?;
    let scale = bounded(map, "scale", i64::MAX)?;
    if precision == UNSET && scale != UNSET {
        return Err(DataTypeError::MissingArgument {
            field: "scale",
            requires: "precision",
        });
    }
    Ok((precision, scale))
}

fn numeric_type(map: &Map<String, Value>) -> Result<DataType, DataTypeError> {
    let (precision, scale) = exact_numeric_shape(map)?;
    Ok(DataType::Numeric { precision, scale })
}

fn decimal_type(map: &Map<String, Value>) -> Result<DataType, DataTypeError> {
    let (precision, scale) = exact_numeric_shape(map)?;
    Ok(DataType::Decimal { precision, scale })
}

fn timestamp_type(map: &Map<String, Value>) -> Result<DataType, DataTypeError> {
    Ok(DataType::Timestamp {
        precision: bounded(map, "precision", MAX_TIMESTAMP_PRECISION)?,
        timezone: bool_field(map, "timezone")?,
    })
}

// =============================================================================
// Construction
// =============================================================================

impl DataType {
    /// Build from a type phrase such as `varchar( 100 )` or `numeric(19, 2)`.
    ///
    /// The type name is matched case-insensitively. A name outside the known
    /// set yields the plain `base` variant; phrases never introduce new tags.
    /// A `timestamp ... with time zone` phrase sets the time zone flag.
    ///
    /// # Errors
    ///
    /// Returns [`DataTypeError`] when an argument is out of range for the
    /// selected variant (e.g. `timestamp( 9 )`).
    pub fn parse(phrase: &str) -> Result<Self, DataTypeError> {
        let lowered = phrase.to_lowercase();
        let decomposed = decompose_type_phrase(&lowered);
        let mut map = decomposed.to_mapping();
        if decomposed.type_name == "timestamp" && lowered.contains("with time zone") {
            map.insert("timezone".into(), Value::Bool(true));
        }
        resolve(&map, Fallback::Base)
    }

    /// Build from a mapping keyed by `type`.
    ///
    /// The tag matches case-insensitively, like a phrase's type name. An
    /// unrecognized `type` gives [`DataType::Base`] carrying that tag as
    /// written. A mapping without `type` is the plain `base` variant.
    ///
    /// # Errors
    ///
    /// Returns [`DataTypeError`] when a shape field has the wrong JSON type or
    /// is out of range.
    pub fn from_mapping(map: &Map<String, Value>) -> Result<Self, DataTypeError> {
        resolve(map, Fallback::KeepTag)
    }

    /// Build from a JSON value: strings are parsed, mappings are resolved.
    ///
    /// # Errors
    ///
    /// Any other JSON kind is [`DataTypeError::UnsupportedValue`].
    pub fn from_value(value: &Value) -> Result<Self, DataTypeError> {
        match value {
            Value::String(phrase) => Self::parse(phrase),
            Value::Object(map) => Self::from_mapping(map),
            other => Err(DataTypeError::UnsupportedValue(value_kind(other))),
        }
    }

    /// The variant's tag (`int` and `str` are already normalized)
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Base(tag) => tag,
            Self::String { .. } => "string",
            Self::Char { .. } => "char",
            Self::Varchar { .. } => "varchar",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::SmallInt => "smallint",
            Self::BigInt => "bigint",
            Self::Numeric { .. } => "numeric",
            Self::Decimal { .. } => "decimal",
            Self::Timestamp { .. } => "timestamp",
        }
    }

    /// Length limit of string-like variants
    #[must_use]
    pub fn max_length(&self) -> Option<i64> {
        match self {
            Self::String { max_length }
            | Self::Char { max_length }
            | Self::Varchar { max_length } => Some(*max_length),
            _ => None,
        }
    }

    /// Precision of numeric and timestamp variants
    #[must_use]
    pub fn precision(&self) -> Option<i64> {
        match self {
            Self::Numeric { precision, .. }
            | Self::Decimal { precision, .. }
            | Self::Timestamp { precision, .. } => Some(*precision),
            _ => None,
        }
    }

    /// Scale of numeric variants
    #[must_use]
    pub fn scale(&self) -> Option<i64> {
        match self {
            Self::Numeric { scale, .. } | Self::Decimal { scale, .. } => Some(*scale),
            _ => None,
        }
    }

    /// Time zone flag of the timestamp variant
    #[must_use]
    pub fn timezone(&self) -> Option<bool> {
        match self {
            Self::Timestamp { timezone, .. } => Some(*timezone),
            _ => None,
        }
    }

    /// `true` for the generic fallback variant
    #[inline]
    #[must_use]
    pub fn is_base(&self) -> bool {
        matches!(self, Self::Base(_))
    }

    /// Structured form: `type` plus the variant's shape fields
    #[must_use]
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("type".into(), Value::from(self.kind()));
        if let Some(max_length) = self.max_length() {
            map.insert("max_length".into(), Value::from(max_length));
        }
        if let Some(precision) = self.precision() {
            map.insert("precision".into(), Value::from(precision));
        }
        if let Some(scale) = self.scale() {
            map.insert("scale".into(), Value::from(scale));
        }
        if let Some(timezone) = self.timezone() {
            map.insert("timezone".into(), Value::from(timezone));
        }
        map
    }
}

impl FromStr for DataType {
    type Err = DataTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())?;
        match self {
            Self::String { max_length }
            | Self::Char { max_length }
            | Self::Varchar { max_length }
                if *max_length > UNSET =>
            {
                write!(f, "( {max_length} )")
            }
            Self::Numeric { precision, scale } | Self::Decimal { precision, scale }
                if *precision > UNSET =>
            {
                if *scale > UNSET {
                    write!(f, "( {precision}, {scale} )")
                } else {
                    write!(f, "( {precision} )")
                }
            }
            Self::Timestamp {
                precision,
                timezone,
            } => {
                if *precision > UNSET {
                    write!(f, "( {precision} )")?;
                }
                if *timezone {
                    f.write_str(" with time zone")?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

// =============================================================================
// Serde Implementation
// =============================================================================

mod serde_impl {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for DataType {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.to_mapping().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for DataType {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Value::deserialize(deserializer)?;
            DataType::from_value(&value).map_err(serde::de::Error::custom)
        }
    }
}
