//! Memory cache implementation using the `cached` crate.
//!
//! A `ttl_seconds` of zero means no expiry, matching the Redis backend; the
//! store is then a plain `SizedCache` bounded only by `max_size`.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use cached::{Cached, SizedCache, TimedSizedCache};

use crate::cache::{AppCache, CacheError};
use crate::config::settings::MemoryCacheConfig;

enum Store {
    Timed(TimedSizedCache<String, String>),
    Sized(SizedCache<String, String>),
}

impl Store {
    fn get(&mut self, key: &str) -> Option<String> {
        match self {
            Store::Timed(cache) => cache.cache_get(key).cloned(),
            Store::Sized(cache) => cache.cache_get(key).cloned(),
        }
    }

    fn set(&mut self, key: String, value: String) {
        match self {
            Store::Timed(cache) => {
                cache.cache_set(key, value);
            }
            Store::Sized(cache) => {
                cache.cache_set(key, value);
            }
        }
    }

    fn remove(&mut self, key: &str) {
        match self {
            Store::Timed(cache) => {
                cache.cache_remove(key);
            }
            Store::Sized(cache) => {
                cache.cache_remove(key);
            }
        }
    }
}

/// In-memory cache with size limit and optional TTL.
pub struct MemoryCache {
    store: Mutex<Store>,
}

impl MemoryCache {
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let store = if config.ttl_seconds == 0 {
            Store::Sized(SizedCache::with_size(config.max_size))
        } else {
            Store::Timed(TimedSizedCache::with_size_and_lifespan(
                config.max_size,
                Duration::from_secs(config.ttl_seconds),
            ))
        };
        Self {
            store: Mutex::new(store),
        }
    }
}

#[async_trait]
impl AppCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        Ok(store.get(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        store.set(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        store.remove(key);
        Ok(())
    }
}
