//! Deployment environment, selecting the `{env}.toml` overlay.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

/// Accepted spellings, canonical name first
const ALIASES: [(Environment, &[&str]); 4] = [
    (Environment::Development, &["development", "dev"]),
    (Environment::Test, &["test"]),
    (Environment::Staging, &["staging", "stage"]),
    (Environment::Production, &["production", "prod"]),
];

impl Environment {
    pub const ENV_VAR: &'static str = "LEDGER_APP_ENV";

    /// Reads `LEDGER_APP_ENV`; unset means development.
    ///
    /// An unrecognised value is logged and also falls back to development.
    pub fn from_env() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(raw) => raw.parse().unwrap_or_else(|err: ConfigError| {
                tracing::warn!(value = %raw, error = %err, "Ignoring {}", Self::ENV_VAR);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        ALIASES
            .iter()
            .find(|(env, _)| env == self)
            .map(|(_, names)| names[0])
            .unwrap_or("development")
    }

    /// Overlay file read on top of `default.toml`
    pub fn overlay_file(&self) -> String {
        format!("{}.toml", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALIASES
            .iter()
            .find(|(_, names)| names.contains(&wanted.as_str()))
            .map(|(env, _)| *env)
            .ok_or_else(|| ConfigError::UnknownEnvironment(s.to_string()))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
