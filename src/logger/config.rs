//! `[logger]` section, deserialized straight into the runtime configuration.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::logger::LoggerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Startup level: trace, debug, info, warn or error
    pub level: String,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl LoggerConfig {
    pub fn level(&self) -> Result<Level, LoggerError> {
        Level::from_str(self.level.trim()).map_err(|_| LoggerError::InvalidSetting {
            field: "logger.level",
            message: format!(
                "'{}' is not one of trace, debug, info, warn, error",
                self.level
            ),
        })
    }

    /// The level must parse, an enabled file needs a path, and something must be written.
    pub fn validate(&self) -> Result<(), LoggerError> {
        self.level()?;
        if self.file.enabled && self.file.path.as_os_str().is_empty() {
            return Err(LoggerError::InvalidSetting {
                field: "logger.file.path",
                message: "required when file logging is enabled".to_string(),
            });
        }
        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::InvalidSetting {
                field: "logger",
                message: "console and file output are both disabled".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// ANSI colours, applied only when stdout is a terminal
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    /// Truncate on startup when false
    pub append: bool,
    pub format: LogFormat,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/ledger.log"),
            append: true,
            format: LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field_of(err: LoggerError) -> &'static str {
        match err {
            LoggerError::InvalidSetting { field, .. } => field,
            other => panic!("Expected InvalidSetting, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: LoggerConfig = toml::from_str("[file]\nenabled = true\n").unwrap();
        assert_eq!(config.level, "info");
        assert!(config.console.enabled);
        assert!(config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_format_is_rejected_at_parse_time() {
        assert!(toml::from_str::<LoggerConfig>("[file]\nformat = \"xml\"\n").is_err());
        let config: LoggerConfig = toml::from_str("[file]\nformat = \"compact\"\n").unwrap();
        assert_eq!(config.file.format, LogFormat::Compact);
    }

    #[test]
    fn test_invalid_level() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "logger.level");
    }

    #[test]
    fn test_enabled_file_needs_path() {
        let config = LoggerConfig {
            file: FileConfig {
                enabled: true,
                path: PathBuf::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "logger.file.path");
    }

    #[test]
    fn test_some_output_required() {
        let config = LoggerConfig {
            console: ConsoleConfig {
                enabled: false,
                colored: false,
            },
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "logger");
    }

    proptest! {
        #[test]
        fn property_levels_parse_in_any_case(idx in 0usize..5, upper in any::<bool>()) {
            let names = ["trace", "debug", "info", "warn", "error"];
            let level = if upper { names[idx].to_uppercase() } else { names[idx].to_string() };
            let config = LoggerConfig { level, ..Default::default() };
            prop_assert!(config.validate().is_ok());
        }
    }
}
