//! Column command implementation
//!
//! Builds a validated column from a phrase and prints its mapping.

use armored_core::{Column, ColumnSettings};

use crate::error::CliError;
use crate::output;

/// Run the column command
pub fn run(
    settings: &ColumnSettings,
    name: &str,
    phrase: &str,
    compact: bool,
) -> Result<(), CliError> {
    let column = Column::parse(name, phrase, settings)?;
    output::print_json(&column, compact)
}
