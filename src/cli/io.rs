//! JSON I/O for the CLI
//!
//! - Input: a JSON document read from a file
//! - Output: pretty-printed JSON on stdout, UTF-8 only

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON document from `path`
pub fn read_json_file(path: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?;

    if content.trim().is_empty() {
        return Err(CliError::io_error(format!("{} is empty", path.display())));
    }

    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Write a value to stdout as pretty JSON
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
