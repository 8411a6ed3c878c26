//! Errors raised while locating, parsing or validating settings.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::loader::{CONFIG_DIR_ENV, CONFIG_FILE_ENV};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A setting holds a value the service cannot run with
    #[error("Invalid setting {field}: {message}")]
    Invalid { field: String, message: String },

    #[error(
        "Unknown environment '{0}'. Valid values are: development, test, staging, production"
    )]
    UnknownEnvironment(String),

    /// Layered and single-file loading were both requested
    #[error(
        "{dir_var}={dir} and {file_var}={file} cannot both be set; use {dir_var} for layered \
         configuration or {file_var} for a single file",
        dir_var = CONFIG_DIR_ENV,
        file_var = CONFIG_FILE_ENV
    )]
    ConflictingSources { dir: String, file: String },

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted settings path of the offending field, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}
