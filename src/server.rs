//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use crate::api::routes::create_router;
use crate::config::{Environment, StoreBackend, settings::Settings};
use crate::db::run_pending_migrations;
use crate::state::AppState;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;

/// HTTP server manager
pub struct Server {
    settings: Settings,
    environment: Environment,
}

impl Server {
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Start the server and run until a shutdown signal arrives.
    ///
    /// Applies pending migrations first when `database.auto_migrate` is set
    /// and PostgreSQL backs the stores.
    ///
    /// # Errors
    /// - Migration, database pool or cache connection errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %self.environment,
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = self.settings.server.port,
            request_timeout = self.settings.server.request_timeout,
            store = self.settings.store.backend.as_str(),
            cache_enabled = self.settings.cache.enabled,
            cache_backend = ?self.settings.cache.backend,
            update_policy = ?self.settings.cache.update_policy,
            "Configuration loaded"
        );

        if self.settings.store.backend == StoreBackend::Postgres {
            tracing::info!(
                max_connections = self.settings.database.max_connections,
                min_connections = self.settings.database.min_connections,
                connection_timeout = self.settings.database.connection_timeout,
                auto_migrate = self.settings.database.auto_migrate,
                "Database configuration loaded"
            );

            if self.settings.database.auto_migrate {
                let applied = run_pending_migrations(&self.settings.database.url).await?;
                tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
            }
        }

        let state = AppState::from_settings(&self.settings).await?;
        tracing::info!("Application state created");

        let router = with_server_layers(
            create_router(state),
            Duration::from_secs(self.settings.server.request_timeout),
        );

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Compression plus a per-request timeout answered with 408.
fn with_server_layers(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CompressionLayer::new())
}

/// Waits for Ctrl+C or SIGTERM.
///
/// A signal that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
