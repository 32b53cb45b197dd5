//! CLI command implementations
//!
//! Each command module implements one `armored` subcommand and writes its
//! result to stdout as JSON.

pub mod column;
pub mod dtype;
pub mod phrase;
pub mod table;
