//! Command-line interface for csvderive
//!
//! Provides:
//! - header: Print the flattened header of a schema
//! - parse: CSV to JSON lines
//! - format: JSON lines to CSV
//! - check: Derive a schema's codec and report it

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod json;

pub use args::{Cli, Command};
pub use commands::{check, format, header, parse, run, run_command, LoadedSchema};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_json_line};
pub use json::{record_from_json, record_to_json};
