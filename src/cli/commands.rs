//! CLI command implementations
//!
//! Every command loads the schema file, derives its codec with the
//! configured overrides, then works on stdin/stdout. Output goes through a
//! caller-supplied writer.

use std::io::{self, Write};
use std::path::Path;

use serde_json::{json, Value as Json};

use crate::codec::{Codec, RecordCodec, CELL_SEPARATOR};
use crate::driver::{parse_values, record_lines};
use crate::observability::JsonLogger;
use crate::schema::{SchemaDocument, SchemaLoader};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_json_line};
use super::json::{record_from_json, record_to_json};

const LOG_TARGET: &str = "csvderive::cli";

/// A loaded schema file together with its derived codec
#[derive(Debug)]
pub struct LoadedSchema {
    /// Parsed schema file
    pub doc: SchemaDocument,
    /// Codec derived for the root record
    pub codec: RecordCodec,
}

impl LoadedSchema {
    /// Loads `path` and derives the root codec under `config`
    pub fn load(path: &Path, config: &Config) -> CliResult<Self> {
        let doc = SchemaLoader::load_file(path)?;
        let codec = doc.derive(&config.overrides())?;
        log::debug!(
            target: LOG_TARGET,
            "Loaded schema '{}' from {} (width {})",
            doc.root.name,
            path.display(),
            codec.width()
        );
        Ok(Self { doc, codec })
    }

    /// Flattened header line
    pub fn header_line(&self) -> String {
        self.codec.header().join(CELL_SEPARATOR)
    }
}

/// Main entry point for the CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_logging(&config, cli.verbose)?;
    run_command(cli.command, &config)
}

/// Installs the JSON log sink at the configured level, raised by `-v` flags
fn init_logging(config: &Config, verbose: u8) -> CliResult<()> {
    let requested = match verbose {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let level = config.level_filter()?.max(requested);
    JsonLogger::init(level).map_err(|e| CliError::config_error(format!("Logger setup failed: {}", e)))
}

/// Run a parsed command against stdout
pub fn run_command(cmd: Command, config: &Config) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Command::Header { schema } => header(&schema, config, &mut out),
        Command::Parse { schema, input, no_header } => {
            let text = read_input(input.as_deref())?;
            parse(&schema, config, config.has_header && !no_header, &text, &mut out)
        }
        Command::Format { schema, no_header } => {
            let text = read_input(None)?;
            format(&schema, config, config.has_header && !no_header, &text, &mut out)
        }
        Command::Check { schema } => check(&schema, config, &mut out),
    }
}

/// Writes the flattened header line
pub fn header<W: Write>(schema: &Path, config: &Config, out: &mut W) -> CliResult<()> {
    let loaded = LoadedSchema::load(schema, config)?;
    writeln!(out, "{}", loaded.header_line())?;
    Ok(())
}

/// Parses CSV `text`, writing one JSON line per record line.
///
/// A line that fails to parse is reported in the output and does not stop
/// the run.
pub fn parse<W: Write>(
    schema: &Path,
    config: &Config,
    has_header: bool,
    text: &str,
    out: &mut W,
) -> CliResult<()> {
    let loaded = LoadedSchema::load(schema, config)?;
    let first_line = 1 + usize::from(has_header);

    let results = parse_values(&loaded.codec, text, has_header);
    let mut rejected = 0;
    for (index, result) in results.iter().enumerate() {
        let line = first_line + index;
        let response = match result {
            Ok(value) => json!({
                "line": line,
                "status": "ok",
                "record": record_to_json(&loaded.doc, &loaded.doc.root, value)?,
            }),
            Err(e) => {
                rejected += 1;
                json!({
                    "line": line,
                    "status": "error",
                    "message": e.to_string(),
                })
            }
        };
        write_json_line(out, &response)?;
    }

    log::info!(
        target: LOG_TARGET,
        "Parsed {} records ({} rejected)",
        results.len(),
        rejected
    );
    Ok(())
}

/// Formats JSON objects (one per line of `text`) as CSV lines.
///
/// Blank lines are skipped. Lines that do not describe a valid record are
/// logged and skipped.
pub fn format<W: Write>(
    schema: &Path,
    config: &Config,
    with_header: bool,
    text: &str,
    out: &mut W,
) -> CliResult<()> {
    let loaded = LoadedSchema::load(schema, config)?;
    if with_header {
        writeln!(out, "{}", loaded.header_line())?;
    }

    for (index, line) in record_lines(text, false).enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match format_line(&loaded, line) {
            Ok(csv) => writeln!(out, "{}", csv)?,
            Err(e) => log::warn!(target: LOG_TARGET, "Input line {} skipped: {}", index + 1, e),
        }
    }
    Ok(())
}

fn format_line(loaded: &LoadedSchema, line: &str) -> CliResult<String> {
    let json: Json = serde_json::from_str(line)?;
    let value = record_from_json(&loaded.doc, &loaded.doc.root, &json)?;
    Ok(loaded.codec.serialize_line(&value)?)
}

/// Derives the codec and reports its width and header as JSON
pub fn check<W: Write>(schema: &Path, config: &Config, out: &mut W) -> CliResult<()> {
    let loaded = LoadedSchema::load(schema, config)?;
    let report = json!({
        "status": "ok",
        "record": loaded.doc.root.name,
        "width": loaded.codec.width(),
        "header": loaded.codec.header(),
        "named_types": loaded.doc.named.keys().collect::<Vec<_>>(),
    });
    write_json_line(out, &report)
}
