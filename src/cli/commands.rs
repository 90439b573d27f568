//! CLI command implementations
//!
//! `check` and `describe` are thin wrappers over the library: they read
//! documents, run the matcher and print one JSON line per result.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{invalid_response, ok_response, read_document, read_schema, write_line};
use crate::schema::Matcher;
use crate::value::Value;

/// Environment variable overriding the configured log filter
pub const LOG_ENV: &str = "SHAPEGUARD_LOG";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Report invalid documents without failing (optional, default false)
    #[serde(default)]
    pub quiet: bool,

    /// Log filter directive (optional, default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines (optional, default false)
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet: false,
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load configuration from a file, or defaults when no path is given
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
}

/// Install the global tracing subscriber.
///
/// `SHAPEGUARD_LOG` takes precedence over the configured level. A
/// subscriber that is already installed is left in place.
pub fn init_logging(config: &Config) -> CliResult<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| CliError::Config(format!("log_level '{}': {}", config.log_level, e)))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        debug!(event = "LOG_SUBSCRIBER_PRESENT", reason = %e, "keeping existing subscriber");
    }

    Ok(())
}

/// Run a parsed CLI command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Check { schema, value, config } => {
            let config = load_config(config.as_deref())?;
            init_logging(&config)?;
            check(&schema, value.as_deref(), &config, &mut io::stdout())
        }
        Command::Describe { schema } => describe(&schema, &mut io::stdout()),
    }
}

/// Validate a document against a schema file and print the result.
///
/// # Errors
///
/// `CliError::Invalid` when the document does not match, unless the
/// configuration is quiet.
pub fn check<W: Write>(
    schema_path: &Path,
    value_path: Option<&Path>,
    config: &Config,
    out: &mut W,
) -> CliResult<()> {
    let schema = read_schema(schema_path)?;
    let value = Value::from(read_document(value_path)?);
    debug!(
        event = "CHECK_BEGIN",
        schema = %schema_path.display(),
        expected = %schema,
        "checking document"
    );

    match Matcher::default().check(&schema, &value) {
        Ok(()) => {
            info!(event = "CHECK_COMPLETE", valid = true, "document valid");
            write_line(out, &ok_response())
        }
        Err(err) => {
            info!(
                event = "CHECK_COMPLETE",
                valid = false,
                code = err.code(),
                path = err.path(),
                "document invalid"
            );
            write_line(out, &invalid_response(&err))?;
            if config.quiet {
                Ok(())
            } else {
                Err(CliError::Invalid(err.to_string()))
            }
        }
    }
}

/// Print a schema's expected shape
pub fn describe<W: Write>(schema_path: &Path, out: &mut W) -> CliResult<()> {
    let schema = read_schema(schema_path)?;
    write_line(out, &serde_json::json!({ "expected": schema.describe() }))
}
