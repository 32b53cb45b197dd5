//! Column model
//!
//! A [`Column`] is built in two phases: [`normalize`] resolves raw input into
//! a [`FieldSet`], [`validate`] applies the cross-field rules. Once built a
//! column never changes; [`Column::updated`] returns a new one.

mod fields;
mod phrase;

pub use fields::{FieldSet, normalize, validate};
pub use phrase::{ParsedPhrase, SERIAL_DEFAULT, parse_phrase};

use core::fmt;

use armored_types::lexical::select_aliased_key;
use armored_types::serde_helpers::optional_reference;
use armored_types::{DataType, Reference, value_kind};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::ColumnSettings;
use crate::error::{ColumnError, Result};
use fields::derive_from_dtype;

// =============================================================================
// Default value
// =============================================================================

/// Column default: an integer or a literal kept as text
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Int(i64),
    Text(String),
}

impl DefaultValue {
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(value) => Value::from(*value),
            Self::Text(value) => Value::from(value.as_str()),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// =============================================================================
// Column
// =============================================================================

/// A validated column definition
///
/// # Examples
///
/// ```
/// use armored_core::Column;
/// use armored_core::config::ColumnSettings;
///
/// let column = Column::parse("id", "serial primary key", &ColumnSettings::default()).unwrap();
/// assert_eq!(column.dtype().to_string(), "integer");
/// assert!(column.pk());
/// assert!(!column.nullable());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
    name: String,
    dtype: DataType,
    nullable: bool,
    unique: bool,
    default: Option<DefaultValue>,
    check: Option<String>,
    pk: bool,
    #[serde(serialize_with = "optional_reference::serialize")]
    fk: Option<Reference>,
}

impl Column {
    /// Build from a raw mapping.
    ///
    /// # Errors
    ///
    /// Any [`ColumnError`] raised by [`normalize`] or [`validate`].
    pub fn from_mapping(raw: &Map<String, Value>, settings: &ColumnSettings) -> Result<Self> {
        validate(normalize(raw, settings)?, settings)
    }

    /// Build from a JSON value, which must be a mapping.
    ///
    /// # Errors
    ///
    /// [`ColumnError::NotAMapping`] for any other JSON kind, otherwise as
    /// [`Column::from_mapping`].
    pub fn from_value(value: &Value, settings: &ColumnSettings) -> Result<Self> {
        match value {
            Value::Object(raw) => Self::from_mapping(raw, settings),
            other => Err(ColumnError::NotAMapping(value_kind(other))),
        }
    }

    /// Build from a name and a column-definition phrase.
    ///
    /// # Errors
    ///
    /// As [`parse_phrase`] and [`validate`].
    pub fn parse(name: &str, phrase: &str, settings: &ColumnSettings) -> Result<Self> {
        FieldSet::from_phrase(name, phrase)?.build(settings)
    }

    /// A new column with `changes` applied on top of this one.
    ///
    /// A datatype phrase in `changes` re-runs the phrase pipeline, so every
    /// phrase-derived field is reset while `name` and `fk` are kept. A
    /// datatype mapping only replaces the data type. Other explicit fields
    /// then override, and the result is validated again.
    ///
    /// # Errors
    ///
    /// Any [`ColumnError`] the resulting fields produce.
    pub fn updated(&self, changes: &Map<String, Value>, settings: &ColumnSettings) -> Result<Self> {
        let current = FieldSet::from(self);
        let mut fields = match select_aliased_key(changes.keys(), &settings.dtype_aliases, false) {
            None => current,
            Some(key) => match &changes[key] {
                Value::Object(map) => FieldSet {
                    dtype: DataType::from_mapping(map)?,
                    ..current
                },
                other => FieldSet {
                    name: current.name,
                    fk: current.fk,
                    ..derive_from_dtype(other)?
                },
            },
        };
        fields.apply_explicit(changes)?;
        validate(fields, settings)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn dtype(&self) -> &DataType {
        &self.dtype
    }

    #[inline]
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub fn unique(&self) -> bool {
        self.unique
    }

    #[inline]
    pub fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    #[inline]
    pub fn check(&self) -> Option<&str> {
        self.check.as_deref()
    }

    #[inline]
    pub fn pk(&self) -> bool {
        self.pk
    }

    #[inline]
    pub fn fk(&self) -> Option<&Reference> {
        self.fk.as_ref()
    }

    /// Plain structured form, the same shape [`Serialize`] produces
    #[must_use]
    pub fn to_mapping(&self) -> Map<String, Value> {
        let fk = match &self.fk {
            Some(reference) => {
                let mut map = Map::new();
                map.insert("table".into(), Value::from(reference.table.as_str()));
                map.insert("column".into(), Value::from(reference.column.as_str()));
                map
            }
            None => Map::new(),
        };

        let mut map = Map::new();
        map.insert("name".into(), Value::from(self.name.as_str()));
        map.insert("dtype".into(), Value::Object(self.dtype.to_mapping()));
        map.insert("nullable".into(), Value::from(self.nullable));
        map.insert("unique".into(), Value::from(self.unique));
        map.insert(
            "default".into(),
            self.default.as_ref().map_or(Value::Null, DefaultValue::to_value),
        );
        map.insert(
            "check".into(),
            self.check.as_deref().map_or(Value::Null, Value::from),
        );
        map.insert("pk".into(), Value::from(self.pk));
        map.insert("fk".into(), Value::Object(fk));
        map
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_mapping())
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Column::from_value(&value, &ColumnSettings::default()).map_err(serde::de::Error::custom)
    }
}
