//! JSON I/O handling for the CLI
//!
//! - Input: JSON documents from files or stdin
//! - Output: one JSON object per line on stdout

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};
use crate::schema::{Schema, ValidationError};

/// Read a JSON document from a file, or from stdin when no path is given
pub fn read_document(path: Option<&Path>) -> CliResult<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if content.trim().is_empty() {
        return Err(CliError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty input",
        )));
    }

    Ok(serde_json::from_str(&content)?)
}

/// Read and parse a schema document
pub fn read_schema(path: &Path) -> CliResult<Schema> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::Schema(format!("{}: {}", path.display(), e)))
}

/// Success response line
pub fn ok_response() -> Value {
    serde_json::json!({ "status": "ok" })
}

/// Failure response line for a validation error
pub fn invalid_response(err: &ValidationError) -> Value {
    serde_json::json!({
        "status": "error",
        "code": err.code(),
        "message": err.to_string(),
        "path": err.path(),
    })
}

/// Write one JSON line to the given writer
pub fn write_line<W: Write>(writer: &mut W, response: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
