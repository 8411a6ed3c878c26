//! Command executor for dispatching CLI commands

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::{Environment, settings::Settings};
use crate::error::{AppError, AppResult};

/// Dispatch the parsed command; no subcommand means `serve`.
///
/// # Errors
/// Returns errors from command handlers or argument validation failures
pub async fn execute_command(cli: &Cli, settings: Settings, environment: Environment) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match cli.command_or_default() {
        Commands::Serve { dry_run, .. } => {
            ServeCommandHandler::new(settings, environment)
                .execute(dry_run)
                .await
        }
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await
        }
    }
}
