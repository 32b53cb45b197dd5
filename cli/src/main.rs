//! armored CLI - Main entry point

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use armored_core::Settings;
use armored_cli::{CliError, commands};
use armored_cli::output;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter
const LOG_ENV: &str = "ARMORED_LOG";

/// armored - column-definition phrase parser
#[derive(Parser, Debug)]
#[command(name = "armored")]
#[command(author, version, about = "Parse column-definition phrases into schema models", long_about = None)]
struct Cli {
    /// Path to settings file (default: armored.toml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a data type phrase, e.g. "numeric(19, 2)"
    Dtype {
        /// Data type phrase
        phrase: String,
    },

    /// Build a validated column from a column-definition phrase
    Column {
        /// Column-definition phrase, e.g. "varchar( 100 ) not null unique"
        phrase: String,

        /// Column name
        #[arg(short, long, default_value = "column")]
        name: String,
    },

    /// Show how a phrase splits into modifiers
    Phrase {
        /// Column-definition phrase
        phrase: String,
    },

    /// Normalize a JSON table document
    Table {
        /// Path to the document, `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", output::err_line(&format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    let compact = cli.compact;

    match cli.command {
        Command::Dtype { phrase } => commands::dtype::run(&phrase, compact)?,
        Command::Column { phrase, name } => {
            commands::column::run(&settings.column, &name, &phrase, compact)?
        }
        Command::Phrase { phrase } => commands::phrase::run(&phrase, compact)?,
        Command::Table { input } => commands::table::run(&settings.column, &input, compact)
            .with_context(|| format!("failed to normalize {}", input.display()))?,
    }
    Ok(())
}

fn load_settings(custom_path: Option<&Path>) -> anyhow::Result<Settings> {
    let settings = match custom_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading settings");
            Settings::load(path).map_err(CliError::from)?
        }
        None => {
            let cwd = std::env::current_dir().context("cannot read working directory")?;
            Settings::discover(&cwd).map_err(CliError::from)?
        }
    };
    Ok(settings)
}
