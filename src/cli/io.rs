//! Input and output helpers for CLI commands

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::Value as Json;

use super::errors::{CliError, CliResult};

/// Reads the whole input, from a file when given and stdin otherwise
pub fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| CliError::io_error(format!("Failed to read '{}': {}", p.display(), e))),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Writes one JSON value followed by a newline
pub fn write_json_line<W: Write>(writer: &mut W, value: &Json) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
