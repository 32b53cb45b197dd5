//! Table command implementation
//!
//! Reads a JSON table document from a file or stdin and prints the
//! normalized table with its derived constraints.

use std::io::Read;
use std::path::Path;

use armored_core::{ColumnSettings, Table};
use serde_json::Value;

use crate::error::CliError;
use crate::output;

/// Input path that reads stdin
pub const STDIN: &str = "-";

/// Run the table command
pub fn run(settings: &ColumnSettings, input: &Path, compact: bool) -> Result<(), CliError> {
    let document = read_document(input)?;
    let value: Value = serde_json::from_str(&document)?;
    let table = Table::from_value(&value, settings)?;

    tracing::info!(
        table = %table.name,
        columns = table.schemas.len(),
        foreign_keys = table.fk.len(),
        "normalized table"
    );
    output::print_json(&table, compact)?;

    let pk = table.pk.name.as_deref().unwrap_or("none");
    eprintln!(
        "{}",
        output::muted(&format!(
            "{}: {} column(s), primary key {}, {} foreign key(s)",
            table.name,
            table.schemas.len(),
            pk,
            table.fk.len()
        ))
    );
    Ok(())
}

fn read_document(input: &Path) -> Result<String, CliError> {
    if input.as_os_str() == STDIN {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| CliError::IoError(format!("stdin: {e}")))?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input)
            .map_err(|e| CliError::IoError(format!("{}: {e}", input.display())))
    }
}
