//! Serve command handler

use crate::config::{Environment, StoreBackend, settings::Settings};
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Run the server until shutdown, or only validate when `dry_run` is set.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }
        Server::new(self.config.clone(), self.environment)
            .run()
            .await
            .map_err(Into::into)
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid ({} environment)", self.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.store.backend {
            StoreBackend::Postgres => println!("✓ Store: postgres (database URL configured)"),
            StoreBackend::Memory => println!("✓ Store: in-memory (data is lost on restart)"),
        }
        if self.config.cache.enabled {
            println!(
                "✓ Cache: {:?} with {:?} update policy",
                self.config.cache.backend, self.config.cache.update_policy
            );
        } else {
            println!("✓ Cache: disabled");
        }
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/ledger_test".to_string();
        config
    }

    #[test]
    fn test_serve_handler_new() {
        let config = create_valid_config();
        let handler = ServeCommandHandler::new(config.clone(), Environment::Test);
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run() {
        let handler = ServeCommandHandler::new(create_valid_config(), Environment::Test);
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_invalid_config() {
        let mut config = create_valid_config();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config, Environment::Test);
        assert!(handler.execute(true).await.is_err());
    }
}
