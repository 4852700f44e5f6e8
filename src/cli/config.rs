//! CLI configuration
//!
//! Loaded from an optional JSON file passed with `--config`. Every key has
//! a default, so an empty object is a valid configuration.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::codec::{is_valid_date_format, DEFAULT_DATE_FORMAT};
use crate::schema::CodecOverrides;

use super::errors::{CliError, CliResult};

/// csvderive configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Whether CSV input starts with a header line, and output gets one
    #[serde(default = "default_has_header")]
    pub has_header: bool,

    /// chrono format string for date cells
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Minimum log level (off, error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_has_header() -> bool {
    true
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            has_header: default_has_header(),
            date_format: default_date_format(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if !is_valid_date_format(&self.date_format) {
            return Err(CliError::config_error(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }
        self.level_filter()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn level_filter(&self) -> CliResult<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| CliError::config_error(format!("Invalid log_level '{}'", self.log_level)))
    }

    /// Codec overrides implied by this configuration
    pub fn overrides(&self) -> CodecOverrides {
        if self.date_format == DEFAULT_DATE_FORMAT {
            CodecOverrides::new()
        } else {
            CodecOverrides::new().with_date_format(self.date_format.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Primitive, TypeKey};
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("csvderive.json");
        fs::write(&path, r#"{"has_header": false, "date_format": "%d/%m/%Y"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.has_header);
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_invalid_date_format() {
        let config = Config {
            date_format: "%Q".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let config = Config {
            log_level: "loud".into(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.message().contains("loud"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("csvderive.json");
        fs::write(&path, r#"{"delimiter": ";"}"#).unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_overrides_carry_date_format() {
        let key = TypeKey::Primitive(Primitive::Date);
        assert!(Config::default().overrides().codec(&key).is_none());

        let config = Config {
            date_format: "%d.%m.%Y".into(),
            ..Config::default()
        };
        assert!(config.overrides().codec(&key).is_some());
    }
}
