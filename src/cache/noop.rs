//! NoOp cache implementation.
//!
//! Used when caching is disabled. Every read misses, so all reads fall
//! through to the store.

use async_trait::async_trait;

use crate::cache::{AppCache, CacheError};

/// A no-operation cache that doesn't store anything.
///
/// Used when `cache.enabled = false` in configuration.
pub struct NoOpCache;

impl NoOpCache {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppCache for NoOpCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String) -> Result<(), CacheError> {
        Ok(())
    }

    async fn remove(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }
}
