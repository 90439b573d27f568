//! CLI argument definitions using clap
//!
//! Commands:
//! - shapeguard check --schema <path> [--value <path>] [--config <path>]
//! - shapeguard describe --schema <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// shapeguard - runtime schema validation for JSON documents
#[derive(Parser, Debug)]
#[command(name = "shapeguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON document against a schema file
    Check {
        /// Path to the schema document
        #[arg(long)]
        schema: PathBuf,

        /// Path to the value document (reads stdin when omitted)
        #[arg(long)]
        value: Option<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the expected shape described by a schema file
    Describe {
        /// Path to the schema document
        #[arg(long)]
        schema: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "shapeguard", "check", "--schema", "s.json", "--value", "v.json",
        ])
        .unwrap();
        match cli.command {
            Command::Check { schema, value, config } => {
                assert_eq!(schema, PathBuf::from("s.json"));
                assert_eq!(value, Some(PathBuf::from("v.json")));
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_schema_is_required() {
        assert!(Cli::try_parse_from(["shapeguard", "describe"]).is_err());
    }
}
