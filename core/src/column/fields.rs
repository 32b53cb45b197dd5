//! Two-phase column construction
//!
//! [`normalize`] turns a raw mapping into a [`FieldSet`]. It resolves aliases,
//! runs the phrase pipeline and type-checks each field, but never looks at
//! how fields relate to each other. [`validate`] then applies the cross-field
//! rules and produces the final [`Column`].

use armored_types::lexical::{collapse_whitespace, decompose_type_phrase, select_aliased_key};
use armored_types::serde_helpers::reference_from_value;
use armored_types::{BASE_TAG, DataType, Reference, value_kind};
use serde_json::{Map, Value};

use super::phrase::parse_phrase;
use super::{Column, DefaultValue};
use crate::config::{ColumnSettings, PkNullablePolicy};
use crate::error::{ColumnError, Result};

// Field name first, then its capitalised alias.
pub(crate) const NAME_KEYS: &[&str] = &["name", "ColumnName"];
pub(crate) const NULLABLE_KEYS: &[&str] = &["nullable", "Nullable"];
pub(crate) const UNIQUE_KEYS: &[&str] = &["unique", "Unique"];
pub(crate) const DEFAULT_KEYS: &[&str] = &["default", "Default"];
pub(crate) const CHECK_KEYS: &[&str] = &["check", "Check"];
pub(crate) const PK_KEYS: &[&str] = &["pk", "PrimaryKey"];
pub(crate) const FK_KEYS: &[&str] = &["fk", "ForeignKey"];

/// Column fields resolved from input, not yet cross-checked.
///
/// Also serves as a builder for columns assembled in code:
///
/// ```
/// use armored_core::column::FieldSet;
/// use armored_core::config::ColumnSettings;
/// use armored_types::DataType;
///
/// let column = FieldSet::new("id", DataType::Integer)
///     .primary_key()
///     .build(&ColumnSettings::default())
///     .unwrap();
/// assert!(!column.nullable());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSet {
    pub name: String,
    pub dtype: DataType,
    pub nullable: bool,
    pub unique: bool,
    pub default: Option<DefaultValue>,
    pub check: Option<String>,
    pub pk: bool,
    pub fk: Option<Reference>,
}

impl Default for FieldSet {
    fn default() -> Self {
        Self {
            name: String::new(),
            dtype: DataType::default(),
            nullable: true,
            unique: false,
            default: None,
            check: None,
            pk: false,
            fk: None,
        }
    }
}

impl FieldSet {
    /// Fields with every flag at its default
    #[must_use]
    pub fn new(name: impl AsRef<str>, dtype: DataType) -> Self {
        Self {
            name: normalize_name(name.as_ref()),
            dtype,
            ..Self::default()
        }
    }

    /// Fields derived from a column-definition phrase
    ///
    /// # Errors
    ///
    /// Fails when the phrase has a malformed check clause or its data type
    /// arguments are out of range.
    pub fn from_phrase(name: impl AsRef<str>, phrase: &str) -> Result<Self> {
        let parsed = parse_phrase(phrase)?;
        Ok(Self {
            name: normalize_name(name.as_ref()),
            dtype: dtype_from_phrase(&parsed.dtype)?,
            nullable: parsed.nullable,
            unique: parsed.unique,
            default: parsed.default.map(DefaultValue::Text),
            check: parsed.check,
            pk: parsed.pk,
            fk: None,
        })
    }

    #[must_use]
    pub fn not_null(self) -> Self {
        Self {
            nullable: false,
            ..self
        }
    }

    #[must_use]
    pub fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    #[must_use]
    pub fn unique(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    #[must_use]
    pub fn primary_key(self) -> Self {
        Self { pk: true, ..self }
    }

    #[must_use]
    pub fn default_value(self, value: impl Into<DefaultValue>) -> Self {
        Self {
            default: Some(value.into()),
            ..self
        }
    }

    #[must_use]
    pub fn check(self, clause: impl Into<String>) -> Self {
        Self {
            check: Some(clause.into()),
            ..self
        }
    }

    #[must_use]
    pub fn references(self, reference: Reference) -> Self {
        Self {
            fk: Some(reference),
            ..self
        }
    }

    /// Validate into a [`Column`]
    ///
    /// # Errors
    ///
    /// See [`validate`].
    pub fn build(self, settings: &ColumnSettings) -> Result<Column> {
        validate(self, settings)
    }

    /// Overwrite fields with the ones explicitly present in `raw`.
    pub(crate) fn apply_explicit(&mut self, raw: &Map<String, Value>) -> Result<()> {
        if let Some(value) = lookup(raw, NAME_KEYS) {
            self.name = normalize_name(expect_str(value, "name")?);
        }
        if let Some(value) = lookup(raw, NULLABLE_KEYS) {
            self.nullable = expect_bool(value, "nullable")?;
        }
        if let Some(value) = lookup(raw, UNIQUE_KEYS) {
            self.unique = expect_bool(value, "unique")?;
        }
        if let Some(value) = lookup(raw, PK_KEYS) {
            self.pk = expect_bool(value, "pk")?;
        }
        if let Some(value) = lookup(raw, DEFAULT_KEYS) {
            self.default = match value {
                Value::Null => None,
                Value::String(s) => Some(DefaultValue::Text(s.clone())),
                Value::Number(n) => Some(DefaultValue::Int(n.as_i64().ok_or(
                    ColumnError::InvalidField {
                        field: "default",
                        expected: "an integer or a string",
                    },
                )?)),
                _ => {
                    return Err(ColumnError::InvalidField {
                        field: "default",
                        expected: "an integer or a string",
                    });
                }
            };
        }
        if let Some(value) = lookup(raw, CHECK_KEYS) {
            self.check = match value {
                Value::Null => None,
                other => Some(expect_str(other, "check")?.to_string()),
            };
        }
        if let Some(value) = lookup(raw, FK_KEYS) {
            self.fk = reference_from_value(value).map_err(|_| ColumnError::InvalidField {
                field: "fk",
                expected: "a mapping with `table` and `column`, or `{}`",
            })?;
        }
        Ok(())
    }
}

impl From<&Column> for FieldSet {
    fn from(column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            dtype: column.dtype.clone(),
            nullable: column.nullable,
            unique: column.unique,
            default: column.default.clone(),
            check: column.check.clone(),
            pk: column.pk,
            fk: column.fk.clone(),
        }
    }
}

// =============================================================================
// Phase one: normalize
// =============================================================================

/// Resolve a raw column mapping into a [`FieldSet`].
///
/// The datatype is read from the first of `settings.dtype_aliases` present in
/// `raw`. A phrase value runs the full pipeline; a mapping value only builds
/// the data type. Fields written explicitly in `raw` then override whatever
/// the phrase produced.
///
/// # Errors
///
/// - [`ColumnError::MissingDatatypeKey`] when no alias is present
/// - [`ColumnError::UnsupportedDatatypeValueType`] for a non-string, non-mapping datatype
/// - [`ColumnError::MissingField`] without a `name`
/// - [`ColumnError::InvalidField`] for a mistyped field
pub fn normalize(raw: &Map<String, Value>, settings: &ColumnSettings) -> Result<FieldSet> {
    let key = select_aliased_key(raw.keys(), &settings.dtype_aliases, false).ok_or_else(|| {
        ColumnError::MissingDatatypeKey {
            aliases: settings.dtype_aliases.clone(),
        }
    })?;

    let mut fields = derive_from_dtype(&raw[key])?;

    if lookup(raw, NAME_KEYS).is_none() {
        return Err(ColumnError::MissingField("name"));
    }
    fields.apply_explicit(raw)?;
    Ok(fields)
}

/// Fields implied by the datatype value alone
pub(crate) fn derive_from_dtype(value: &Value) -> Result<FieldSet> {
    match value {
        Value::String(phrase) => FieldSet::from_phrase("", phrase),
        Value::Object(map) => Ok(FieldSet {
            dtype: DataType::from_mapping(map)?,
            ..FieldSet::default()
        }),
        other => Err(ColumnError::UnsupportedDatatypeValueType(value_kind(other))),
    }
}

// =============================================================================
// Phase two: validate
// =============================================================================

/// Apply the cross-field rules and freeze the fields into a [`Column`].
///
/// - `pk` with `nullable`: corrected to non-null, or rejected, per
///   `settings.pk_nullable`
/// - `default` with `nullable`: always an error
///
/// # Errors
///
/// [`ColumnError::ConflictingNullableDefault`] or
/// [`ColumnError::PkNullableConflict`].
pub fn validate(mut fields: FieldSet, settings: &ColumnSettings) -> Result<Column> {
    if fields.pk && fields.nullable {
        match settings.pk_nullable {
            PkNullablePolicy::Correct => {
                crate::armored_trace_correction!(fields.name, "nullable");
                fields.nullable = false;
            }
            PkNullablePolicy::Reject => return Err(ColumnError::PkNullableConflict),
        }
    }
    if fields.default.is_some() && fields.nullable {
        return Err(ColumnError::ConflictingNullableDefault);
    }

    let FieldSet {
        name,
        dtype,
        nullable,
        unique,
        default,
        check,
        pk,
        fk,
    } = fields;
    Ok(Column {
        name,
        dtype,
        nullable,
        unique,
        default,
        check,
        pk,
        fk,
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// Column names lose every whitespace character, not just the outer ones.
pub(crate) fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect()
}

fn dtype_from_phrase(phrase: &str) -> Result<DataType> {
    let dtype = DataType::parse(phrase)?;
    if dtype.is_base() {
        let type_name = decompose_type_phrase(phrase).type_name;
        if type_name != BASE_TAG {
            crate::armored_trace_fallback!(collapse_whitespace(&type_name));
        }
    }
    Ok(dtype)
}

pub(crate) fn lookup<'a>(raw: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    select_aliased_key(raw.keys(), keys, false).and_then(|key| raw.get(key))
}

fn expect_bool(value: &Value, field: &'static str) -> Result<bool> {
    value.as_bool().ok_or(ColumnError::InvalidField {
        field,
        expected: "a boolean",
    })
}

fn expect_str<'a>(value: &'a Value, field: &'static str) -> Result<&'a str> {
    value.as_str().ok_or(ColumnError::InvalidField {
        field,
        expected: "a string",
    })
}
