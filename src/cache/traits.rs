//! AppCache trait definition.

use async_trait::async_trait;

use crate::cache::CacheError;

/// Key-value cache client used by the cache-aside services.
///
/// Values are opaque strings. Expiry and eviction are the backend's concern
/// and are configured per backend, never through this trait.
#[async_trait]
pub trait AppCache: Send + Sync {
    /// Get a value from the cache. `Ok(None)` is a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value, replacing any previous value for the key.
    async fn set(&self, key: &str, value: String) -> Result<(), CacheError>;

    /// Remove a value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), CacheError>;
}
