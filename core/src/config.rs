//! Parser settings
//!
//! Handles loading `armored.toml`. Every field is optional; a missing file or
//! table falls back to [`Settings::default`].
//!
//! ```toml
//! [column]
//! dtype_aliases = ["dtype", "DataType", "datatype"]
//! pk_nullable = "correct"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "armored.toml";

/// Keys accepted for the datatype field of a column mapping, in priority order
pub const DEFAULT_DTYPE_ALIASES: &[&str] = &["dtype", "DataType", "datatype"];

// ============================================================================
// Column settings
// ============================================================================

/// What to do with a primary key column that is also marked nullable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PkNullablePolicy {
    /// Force `nullable` to false
    #[default]
    Correct,
    /// Fail with [`ColumnError::PkNullableConflict`](crate::ColumnError::PkNullableConflict)
    Reject,
}

impl PkNullablePolicy {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for PkNullablePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for building columns from mappings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnSettings {
    /// Accepted keys for the datatype field, first match wins
    pub dtype_aliases: Vec<String>,
    /// Primary key / nullable conflict policy
    pub pk_nullable: PkNullablePolicy,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            dtype_aliases: DEFAULT_DTYPE_ALIASES.iter().map(|s| s.to_string()).collect(),
            pk_nullable: PkNullablePolicy::default(),
        }
    }
}

impl ColumnSettings {
    /// Settings that reject primary keys marked nullable
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            pk_nullable: PkNullablePolicy::Reject,
            ..Self::default()
        }
    }

    /// Replace the accepted datatype aliases
    #[must_use]
    pub fn with_dtype_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dtype_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

// ============================================================================
// Settings file
// ============================================================================

/// Top-level `armored.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub column: ColumnSettings,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Load `armored.toml` from `dir` if it exists, otherwise the defaults
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.column.dtype_aliases.is_empty() {
            return Err(ConfigError::Invalid(
                "column.dtype_aliases must list at least one key".into(),
            ));
        }
        if self.column.dtype_aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "column.dtype_aliases cannot contain blank keys".into(),
            ));
        }
        Ok(())
    }
}
