//! CLI output helpers

use colored::Colorize;
use serde::Serialize;

use crate::error::CliError;

pub fn muted(text: &str) -> String {
    format!("{}", text.bright_black())
}

pub fn err_line(text: &str) -> String {
    format!("{} {}", "Error:".red().bold(), text)
}

/// Render `value` as JSON, pretty unless `compact`
pub fn render_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(rendered)
}

/// Print `value` as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<(), CliError> {
    println!("{}", render_json(value, compact)?);
    Ok(())
}
