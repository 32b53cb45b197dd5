//! Serde helpers for optional foreign key references
//!
//! A column without a foreign key serializes its `fk` field as an empty
//! mapping (`{}`) rather than `null`, and accepts either form back.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::constraint::Reference;

/// Read an optional reference from a JSON value.
///
/// `null` and `{}` mean "no reference"; any other mapping must hold both
/// `table` and `column`.
///
/// # Errors
///
/// Returns the `serde_json` error when the value is not a valid reference.
pub fn reference_from_value(value: &Value) -> Result<Option<Reference>, serde_json::Error> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        other => Reference::deserialize(other).map(Some),
    }
}

/// `#[serde(with = "...")]` module for `Option<Reference>` rendered as `{}`
pub mod optional_reference {
    use super::*;

    pub fn serialize<S>(value: &Option<Reference>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(reference) => reference.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Reference>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        reference_from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "optional_reference", default)]
        fk: Option<Reference>,
    }

    #[test]
    fn test_empty_mapping_round_trip() {
        let holder = Holder { fk: None };
        assert_eq!(serde_json::to_value(&holder).unwrap(), json!({"fk": {}}));
        let back: Holder = serde_json::from_value(json!({"fk": {}})).unwrap();
        assert_eq!(back, holder);
    }

    #[test]
    fn test_reference_round_trip() {
        let holder = Holder {
            fk: Some(Reference::new("bar", "baz")),
        };
        let value = serde_json::to_value(&holder).unwrap();
        assert_eq!(value, json!({"fk": {"table": "bar", "column": "baz"}}));
        assert_eq!(serde_json::from_value::<Holder>(value).unwrap(), holder);
    }

    #[test]
    fn test_reference_from_value() {
        assert_eq!(reference_from_value(&Value::Null).unwrap(), None);
        assert!(reference_from_value(&json!({"table": "bar"})).is_err());
        assert!(reference_from_value(&json!("bar.baz")).is_err());
    }
}
