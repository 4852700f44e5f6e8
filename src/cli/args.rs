//! CLI argument definitions using clap
//!
//! Commands:
//! - csvderive header --schema <path>
//! - csvderive parse --schema <path> [--input <path>] [--no-header]
//! - csvderive format --schema <path> [--no-header]
//! - csvderive check --schema <path>

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// csvderive - schema-driven CSV parsing and formatting
#[derive(Parser, Debug)]
#[command(name = "csvderive")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the flattened header line of a schema
    Header {
        /// Path to schema file
        #[arg(long)]
        schema: PathBuf,
    },

    /// Parse CSV into JSON lines, one per input record
    Parse {
        /// Path to schema file
        #[arg(long)]
        schema: PathBuf,

        /// CSV file to read (stdin if omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Treat the first line as a record instead of a header
        #[arg(long)]
        no_header: bool,
    },

    /// Format JSON objects from stdin as CSV lines
    Format {
        /// Path to schema file
        #[arg(long)]
        schema: PathBuf,

        /// Do not write a header line
        #[arg(long)]
        no_header: bool,
    },

    /// Derive the codec for a schema and report its width and header
    Check {
        /// Path to schema file
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
