//! Structured JSON log sink for the `log` facade
//!
//! - One log line = one JSON object
//! - `event` first, then `severity`, then extra fields sorted by key
//! - Synchronous, written to stderr so stdout stays reserved for data

use std::io::{self, Write};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// A `log` implementation writing structured JSON lines
#[derive(Debug)]
pub struct JsonLogger {
    level: LevelFilter,
}

impl JsonLogger {
    /// Creates a logger accepting records up to `level`
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Installs the logger as the global `log` sink
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(Self::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Writes one event line to `writer`
    ///
    /// Fields are output in deterministic order (alphabetical by key)
    pub fn write_event<W: Write>(
        writer: &mut W,
        level: Level,
        event: &str,
        fields: &[(&str, &str)],
    ) -> io::Result<()> {
        let mut output = String::with_capacity(128);

        output.push('{');

        output.push_str("\"event\":\"");
        escape_json_string(&mut output, event);
        output.push('"');

        output.push_str(",\"severity\":\"");
        output.push_str(level.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            escape_json_string(&mut output, key);
            output.push_str("\":\"");
            escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push_str("}\n");

        // one write per event
        writer.write_all(output.as_bytes())?;
        writer.flush()
    }
}

impl Log for JsonLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        let _ = Self::write_event(
            &mut io::stderr().lock(),
            record.level(),
            &message,
            &[("target", record.target())],
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Escape special characters for JSON strings
fn escape_json_string(output: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_control() => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(level: Level, event: &str, fields: &[(&str, &str)]) -> String {
        let mut buffer = Vec::new();
        JsonLogger::write_event(&mut buffer, level, event, fields).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_log_json_format() {
        let output = capture(Level::Info, "Derived codec", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "Derived codec");
        assert_eq!(parsed["severity"], "INFO");
    }

    #[test]
    fn test_log_deterministic_ordering() {
        let output1 = capture(Level::Debug, "TEST", &[("zebra", "1"), ("apple", "2"), ("mango", "3")]);
        let output2 = capture(Level::Debug, "TEST", &[("apple", "2"), ("mango", "3"), ("zebra", "1")]);

        assert_eq!(output1, output2);

        let apple_pos = output1.find("apple").unwrap();
        let mango_pos = output1.find("mango").unwrap();
        let zebra_pos = output1.find("zebra").unwrap();
        assert!(apple_pos < mango_pos);
        assert!(mango_pos < zebra_pos);
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let output = capture(Level::Trace, "Record 2 rejected: \"x\"\n", &[("target", "a\tb")]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "Record 2 rejected: \"x\"\n");
        assert_eq!(parsed["target"], "a\tb");
    }

    #[test]
    fn test_log_one_line_event_first() {
        let output = capture(Level::Warn, "MY_EVENT", &[("a", "1"), ("b", "2")]);

        assert_eq!(output.chars().filter(|c| *c == '\n').count(), 1);
        assert!(output.ends_with('\n'));
        assert!(output.find("\"event\"").unwrap() < output.find("\"severity\"").unwrap());
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = JsonLogger::new(LevelFilter::Info);
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }
}
