//! CLI-specific error types

use std::io;

use thiserror::Error;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error
    #[error("SHAPEGUARD_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Schema document could not be read or parsed
    #[error("SHAPEGUARD_CLI_SCHEMA_ERROR: {0}")]
    Schema(String),

    /// I/O error (files, stdin/stdout)
    #[error("SHAPEGUARD_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input
    #[error("SHAPEGUARD_CLI_JSON_ERROR: {0}")]
    Json(#[from] serde_json::Error),

    /// The document did not match the schema
    #[error("SHAPEGUARD_CLI_INVALID_DOCUMENT: {0}")]
    Invalid(String),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
