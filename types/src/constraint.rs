//! Key constraint types
//!
//! Columns carry their own key flags; a table derives [`PrimaryKey`] and
//! [`ForeignKey`] constraints from them. Unnamed constraints get a name
//! derived from the columns they cover.

use serde::{Deserialize, Deserializer, Serialize};

/// Generate a default name for a primary key constraint
///
/// ```
/// assert_eq!(armored_types::name_for_pk(&["col1", "col2"]), "col1_col2_pk");
/// ```
#[must_use]
pub fn name_for_pk<S: AsRef<str>>(columns: &[S]) -> String {
    let columns: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
    format!("{}_pk", columns.join("_"))
}

/// Generate a default name for a foreign key constraint
#[must_use]
pub fn name_for_fk(to: &str, reference: &Reference) -> String {
    format!("{}_{}_{}_fk", to, reference.table, reference.column)
}

// =============================================================================
// Reference
// =============================================================================

/// Target of a foreign key
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Referenced table
    pub table: String,
    /// Referenced column
    pub column: String,
}

impl Reference {
    #[must_use]
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

// =============================================================================
// Primary Key
// =============================================================================

/// Primary key constraint
///
/// An unnamed key over at least one column is named `"{c1}_{c2}.._pk"`.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct PrimaryKey {
    /// Constraint name
    pub name: Option<String>,
    /// Columns in the primary key, in table order
    pub columns: Vec<String>,
}

impl PrimaryKey {
    /// Create an unnamed primary key; the name is derived from `columns`
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self::with_name(None, columns)
    }

    /// Create a primary key, deriving the name when `name` is `None`
    #[must_use]
    pub fn with_name(name: Option<String>, columns: Vec<String>) -> Self {
        let name = match name {
            Some(name) => Some(name),
            None if !columns.is_empty() => Some(name_for_pk(&columns)),
            None => None,
        };
        Self { name, columns }
    }

    /// `true` when the key covers no column
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<'de> Deserialize<'de> for PrimaryKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            name: Option<String>,
            #[serde(default)]
            columns: Vec<String>,
        }

        let helper = Helper::deserialize(deserializer)?;
        Ok(PrimaryKey::with_name(helper.name, helper.columns))
    }
}

// =============================================================================
// Foreign Key
// =============================================================================

/// Foreign key constraint
///
/// # Examples
///
/// ```
/// use armored_types::{ForeignKey, Reference};
///
/// let fk = ForeignKey::new("bar", Reference::new("ref_table", "ref_column"));
/// assert_eq!(fk.name, "bar_ref_table_ref_column_fk");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    /// Constraint name
    pub name: String,
    /// Local column holding the reference
    pub to: String,
    /// Referenced table and column
    #[serde(rename = "ref")]
    pub reference: Reference,
}

impl ForeignKey {
    /// Create a foreign key with a derived name
    #[must_use]
    pub fn new(to: impl Into<String>, reference: Reference) -> Self {
        Self::with_name(None, to, reference)
    }

    /// Create a foreign key, deriving the name when `name` is `None`
    #[must_use]
    pub fn with_name(name: Option<String>, to: impl Into<String>, reference: Reference) -> Self {
        let to = to.into();
        let name = name.unwrap_or_else(|| name_for_fk(&to, &reference));
        Self {
            name,
            to,
            reference,
        }
    }
}

impl<'de> Deserialize<'de> for ForeignKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            name: Option<String>,
            to: String,
            #[serde(rename = "ref")]
            reference: Reference,
        }

        let helper = Helper::deserialize(deserializer)?;
        Ok(ForeignKey::with_name(helper.name, helper.to, helper.reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pk_name() {
        let pk = PrimaryKey::with_name(Some("foo".into()), vec![]);
        assert_eq!(pk.name.as_deref(), Some("foo"));
        assert!(pk.is_empty());

        let pk = PrimaryKey::new(vec!["col1".into(), "col2".into()]);
        assert_eq!(pk.name.as_deref(), Some("col1_col2_pk"));

        assert_eq!(PrimaryKey::new(vec![]), PrimaryKey::default());
    }

    #[test]
    fn test_pk_deserialize() {
        let pk: PrimaryKey = serde_json::from_value(json!({"columns": ["col1"]})).unwrap();
        assert_eq!(pk.name.as_deref(), Some("col1_pk"));

        let pk: PrimaryKey =
            serde_json::from_value(json!({"name": "foo", "columns": ["col1"]})).unwrap();
        assert_eq!(pk.name.as_deref(), Some("foo"));
        assert_eq!(pk.columns, vec!["col1".to_string()]);
    }

    #[test]
    fn test_fk_deserialize() {
        let fk: ForeignKey = serde_json::from_value(json!({
            "to": "test",
            "ref": {"table": "bar", "column": "baz"}
        }))
        .unwrap();
        assert_eq!(fk.name, "test_bar_baz_fk");
        assert_eq!(fk.reference, Reference::new("bar", "baz"));

        let fk: ForeignKey = serde_json::from_value(json!({
            "name": "foo",
            "to": "test",
            "ref": {"table": "bar", "column": "baz"}
        }))
        .unwrap();
        assert_eq!(fk.name, "foo");
    }

    #[test]
    fn test_reference_requires_both_fields() {
        assert!(serde_json::from_value::<Reference>(json!({"table": "bar"})).is_err());
    }

    #[test]
    fn test_fk_serialize_uses_ref() {
        let fk = ForeignKey::new("foo", Reference::new("bar", "baz"));
        assert_eq!(
            serde_json::to_value(&fk).unwrap(),
            json!({"name": "foo_bar_baz_fk", "to": "foo", "ref": {"table": "bar", "column": "baz"}})
        );
    }
}
