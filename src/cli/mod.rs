//! Command-line interface: argument parsing, configuration merging and
//! dispatch to the serve and migrate handlers.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::settings::Settings;
use crate::logger::{LogLevelHandle, init_logger};

/// Load configuration files and apply CLI overrides.
///
/// Returns the merged settings and the environment they were loaded for.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<(Settings, crate::config::Environment)> {
    let merger = ConfigurationMerger::from_cli(cli).context("Configuration error")?;
    let settings = merger
        .merge_cli_args(cli)
        .context("Configuration merge error")?;
    Ok((settings, merger.environment()))
}

/// Initialize the global logger from settings
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<LogLevelHandle> {
    init_logger(&settings.logger).context("Logger initialization error")
}
