//! Cache manager that selects the configured backend.

use std::sync::Arc;

use crate::cache::memory::MemoryCache;
use crate::cache::noop::NoOpCache;
use crate::cache::redis::RedisCache;
use crate::cache::{AppCache, CacheError};
use crate::config::settings::{CacheBackend, CacheConfig, UpdateCachePolicy};

/// Owns the configured cache backend.
#[derive(Clone)]
pub struct CacheManager {
    backend: Arc<dyn AppCache>,
    config: CacheConfig,
}

impl CacheManager {
    /// Create a new cache manager with the given configuration.
    ///
    /// If caching is disabled, a NoOpCache is used.
    pub async fn new(config: CacheConfig, cache_name: &str) -> Result<Self, CacheError> {
        let backend: Arc<dyn AppCache> = if !config.enabled {
            Arc::new(NoOpCache::new())
        } else {
            match config.backend {
                CacheBackend::Memory => Arc::new(MemoryCache::new(&config.memory)),
                CacheBackend::Redis => Arc::new(RedisCache::new(&config.redis, cache_name).await?),
            }
        };

        tracing::info!(
            enabled = config.enabled,
            backend = ?config.backend,
            cache_name = %cache_name,
            "Cache backend initialized"
        );

        Ok(Self { backend, config })
    }

    /// Get a shared handle to the cache backend.
    pub fn backend(&self) -> Arc<dyn AppCache> {
        Arc::clone(&self.backend)
    }

    /// How updates refresh the cached value.
    pub fn update_policy(&self) -> UpdateCachePolicy {
        self.config.update_policy
    }

    /// Check if caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Name of the active backend, for health reporting.
    pub fn backend_name(&self) -> &'static str {
        if !self.config.enabled {
            return "disabled";
        }
        match self.config.backend {
            CacheBackend::Memory => "memory",
            CacheBackend::Redis => "redis",
        }
    }
}
