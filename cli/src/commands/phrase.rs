//! Phrase command implementation
//!
//! Prints the raw pipeline result without building a data type, which is
//! handy for seeing how a phrase splits into modifiers.

use armored_core::parse_phrase;

use crate::error::CliError;
use crate::output;

/// Run the phrase command
pub fn run(phrase: &str, compact: bool) -> Result<(), CliError> {
    let parsed = parse_phrase(phrase)?;
    output::print_json(&parsed, compact)
}
