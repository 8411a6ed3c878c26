//! Migrate command handler

use crate::config::{StoreBackend, settings::Settings};
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Apply, preview (`dry_run`) or roll back (`rollback`) migrations.
    ///
    /// # Errors
    /// - The in-memory store is configured
    /// - Database connection or migration errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if self.config.store.backend != StoreBackend::Postgres {
            return Err(AppError::Validation {
                field: "store.backend".to_string(),
                reason: "Migrations require the postgres store backend".to_string(),
            });
        }
        self.config.database.validate()?;
        let url = self.config.database.url.as_str();

        if dry_run {
            let pending = pending_migrations(url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations found - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
                println!("\nRun without --dry-run to apply these migrations");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            println!("Rolling back {} migration(s)...", steps);
            let reverted = revert_migrations(url, steps).await?;
            for version in &reverted {
                println!("  - reverted {}", version);
            }
            println!("✓ Rolled back {} migration(s)", reverted.len());
            return Ok(());
        }

        println!("Running database migrations...");
        let applied = run_pending_migrations(url).await?;
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for migration in &applied {
                println!("  - {}", migration);
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
