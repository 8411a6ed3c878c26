//! Error types for the logger

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid setting {field}: {message}")]
    InvalidSetting { field: &'static str, message: String },

    #[error("Invalid filter '{directive}': {message}")]
    Filter { directive: String, message: String },

    #[error("Failed to reload log filter: {message}")]
    Reload { message: String },

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

impl LoggerError {
    pub fn reload(message: impl Into<String>) -> Self {
        Self::Reload {
            message: message.into(),
        }
    }
}
