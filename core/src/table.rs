//! Table aggregation
//!
//! A [`Table`] owns its columns and derives its key constraints from the
//! column flags: one [`PrimaryKey`] over every `pk` column, in column order,
//! and one [`ForeignKey`] per column with a reference.

use std::collections::HashSet;

use armored_types::{ForeignKey, PrimaryKey, value_kind};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::column::Column;
use crate::config::ColumnSettings;
use crate::error::TableError;

/// Table with derived key constraints
///
/// ```
/// use armored_core::{Column, Table};
/// use armored_core::config::ColumnSettings;
///
/// let settings = ColumnSettings::default();
/// let table = Table::new(
///     "users",
///     vec![
///         Column::parse("id", "serial primary key", &settings).unwrap(),
///         Column::parse("email", "varchar( 255 ) not null unique", &settings).unwrap(),
///     ],
/// )
/// .unwrap();
/// assert_eq!(table.pk.name.as_deref(), Some("id_pk"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub schemas: Vec<Column>,
    pub pk: PrimaryKey,
    pub fk: Vec<ForeignKey>,
}

impl Table {
    /// Build a table, deriving its constraints from the columns.
    ///
    /// # Errors
    ///
    /// [`TableError::DuplicateColumn`] when two columns share a name.
    pub fn new(name: impl Into<String>, schemas: Vec<Column>) -> Result<Self, TableError> {
        check_unique_names(&schemas)?;
        let pk = derive_pk(&schemas);
        let fk = derive_fk(&schemas);
        Ok(Self {
            name: name.into(),
            schemas,
            pk,
            fk,
        })
    }

    /// Build from a raw mapping with `name`, `schemas` and optional `pk`/`fk`.
    ///
    /// A `pk` with at least one column, or a non-empty `fk` list, replaces
    /// the constraint derived from the columns.
    ///
    /// # Errors
    ///
    /// - [`TableError::MissingField`] without a `name`
    /// - [`TableError::InvalidField`] for a mistyped field
    /// - [`TableError::Column`] for the first invalid column
    /// - [`TableError::DuplicateColumn`] when two columns share a name
    pub fn from_mapping(raw: &Map<String, Value>, settings: &ColumnSettings) -> Result<Self, TableError> {
        let name = match raw.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(_) => {
                return Err(TableError::InvalidField {
                    field: "name",
                    expected: "a string",
                });
            }
            None => return Err(TableError::MissingField("name")),
        };

        let schemas = match raw.get("schemas") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    Column::from_value(item, settings)
                        .map_err(|source| TableError::Column { index, source })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(TableError::InvalidField {
                    field: "schemas",
                    expected: "a list of columns",
                });
            }
        };

        let mut table = Self::new(name, schemas)?;

        if let Some(value) = raw.get("pk").filter(|v| !v.is_null()) {
            let pk = PrimaryKey::deserialize(value).map_err(|_| TableError::InvalidField {
                field: "pk",
                expected: "a mapping with `columns` and an optional `name`",
            })?;
            if !pk.is_empty() {
                table.pk = pk;
            }
        }
        if let Some(value) = raw.get("fk").filter(|v| !v.is_null()) {
            let fk = Vec::<ForeignKey>::deserialize(value).map_err(|_| TableError::InvalidField {
                field: "fk",
                expected: "a list of foreign keys",
            })?;
            if !fk.is_empty() {
                table.fk = fk;
            }
        }
        Ok(table)
    }

    /// Build from a JSON value, which must be a mapping.
    ///
    /// # Errors
    ///
    /// [`TableError::NotAMapping`] for any other JSON kind, otherwise as
    /// [`Table::from_mapping`].
    pub fn from_value(value: &Value, settings: &ColumnSettings) -> Result<Self, TableError> {
        match value {
            Value::Object(raw) => Self::from_mapping(raw, settings),
            other => Err(TableError::NotAMapping(value_kind(other))),
        }
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.schemas.iter().find(|c| c.name() == name)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Table::from_value(&value, &ColumnSettings::default()).map_err(serde::de::Error::custom)
    }
}

fn check_unique_names(schemas: &[Column]) -> Result<(), TableError> {
    let mut seen = HashSet::with_capacity(schemas.len());
    for column in schemas {
        if !seen.insert(column.name()) {
            return Err(TableError::DuplicateColumn(column.name().to_string()));
        }
    }
    Ok(())
}

fn derive_pk(schemas: &[Column]) -> PrimaryKey {
    PrimaryKey::new(
        schemas
            .iter()
            .filter(|c| c.pk())
            .map(|c| c.name().to_string())
            .collect(),
    )
}

fn derive_fk(schemas: &[Column]) -> Vec<ForeignKey> {
    schemas
        .iter()
        .filter_map(|c| c.fk().map(|reference| ForeignKey::new(c.name(), reference.clone())))
        .collect()
}
