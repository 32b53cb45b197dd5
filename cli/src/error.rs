//! Error types for the CLI

use armored_core::{ColumnError, ConfigError, TableError};
use armored_types::DataTypeError;
use thiserror::Error;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data type phrase rejected
    #[error("Invalid data type: {0}")]
    DataType(#[from] DataTypeError),

    /// Column phrase or mapping rejected
    #[error("Invalid column: {0}")]
    Column(#[from] ColumnError),

    /// Table document rejected
    #[error("Invalid table: {0}")]
    Table(#[from] TableError),

    /// Input is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}
