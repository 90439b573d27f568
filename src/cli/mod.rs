//! CLI module for shapeguard
//!
//! Provides command-line interface for:
//! - check: validate a JSON document against a schema file
//! - describe: print a schema's expected shape

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, describe, init_logging, load_config, run_command, Config, LOG_ENV};
pub use errors::{CliError, CliResult};
pub use io::{read_document, read_schema, write_line};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
