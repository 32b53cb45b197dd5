//! armored CLI - inspect column phrases and table documents
//!
//! # Commands
//!
//! - `armored dtype <PHRASE>` - data type mapping and canonical form
//! - `armored column <PHRASE> [--name NAME]` - validated column mapping
//! - `armored phrase <PHRASE>` - raw phrase pipeline result
//! - `armored table <FILE>` - normalized table document (`-` reads stdin)
//!
//! # Configuration
//!
//! An `armored.toml` in the working directory is picked up automatically;
//! `--config <PATH>` points at another one.
//!
//! ```toml
//! [column]
//! dtype_aliases = ["dtype", "DataType", "datatype"]
//! pk_nullable = "reject"
//! ```

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
