//! Dtype command implementation
//!
//! Parses a type phrase and prints its mapping next to the canonical form.

use armored_types::DataType;
use serde_json::json;

use crate::error::CliError;
use crate::output;

/// Run the dtype command
pub fn run(phrase: &str, compact: bool) -> Result<(), CliError> {
    let dtype = DataType::parse(phrase)?;
    tracing::debug!(phrase, kind = dtype.kind(), "parsed data type");

    output::print_json(
        &json!({
            "canonical": dtype.to_string(),
            "dtype": dtype,
        }),
        compact,
    )
}
