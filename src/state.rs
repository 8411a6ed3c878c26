//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::cache::CacheManager;
use crate::config::{Settings, StoreBackend};
use crate::db::{AsyncDbPool, establish_async_connection_pool};
use crate::repositories::Repositories;
use crate::services::Services;

/// Cache namespace holding entry views
pub const ENTRY_CACHE_NAME: &str = "entries";

/// Application state containing all shared services and resources.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Configured cache backend, shared with the entry service
    pub cache: CacheManager,
    /// Database pool, present when PostgreSQL backs the stores
    pub db_pool: Option<AsyncDbPool>,
    pub store_backend: StoreBackend,
}

impl AppState {
    /// Wire services over the given stores and cache.
    pub fn new(
        repos: Repositories,
        cache: CacheManager,
        db_pool: Option<AsyncDbPool>,
        store_backend: StoreBackend,
    ) -> Self {
        let services = Services::new(repos, &cache);
        Self {
            services,
            cache,
            db_pool,
            store_backend,
        }
    }

    /// Build the state described by the settings: open the database pool
    /// when PostgreSQL is selected and connect the cache backend.
    ///
    /// # Errors
    /// - Database connection pool initialization errors
    /// - Cache backend connection errors
    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let cache = CacheManager::new(settings.cache.clone(), ENTRY_CACHE_NAME).await?;

        let backend = settings.store.backend;
        let (repos, pool) = match backend {
            StoreBackend::Postgres => {
                let pool = establish_async_connection_pool(&settings.database).await?;
                (Repositories::postgres(pool.clone()), Some(pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using the in-memory store; data is lost on restart");
                (Repositories::in_memory(), None)
            }
        };

        Ok(Self::new(repos, cache, pool, backend))
    }

    /// State over in-memory stores and the given cache.
    pub fn in_memory(cache: CacheManager) -> Self {
        Self::new(Repositories::in_memory(), cache, None, StoreBackend::Memory)
    }
}
