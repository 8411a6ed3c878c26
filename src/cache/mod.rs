//! Cache module providing runtime-configurable caching with multiple backends.
//!
//! This module provides a unified caching interface that supports:
//! - Memory cache (in-process, fastest)
//! - Redis cache (distributed, network-based)
//! - NoOp cache (caching disabled, every read misses)
//!
//! # Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! backend = "memory"  # or "redis"
//! update_policy = "remove_then_set"  # or "overwrite", "invalidate"
//!
//! [cache.memory]
//! max_size = 1000
//! ttl_seconds = 300
//!
//! [cache.redis]
//! url = "redis://127.0.0.1:6379"
//! ttl_seconds = 300
//! pool_size = 4
//! connection_timeout = 5
//! key_prefix = "ledger"
//! ```

mod codec;
mod error;
mod manager;
mod memory;
mod noop;
mod redis;
mod traits;

pub use codec::{CacheValue, entry_key};
pub use error::CacheError;
pub use manager::CacheManager;
pub use memory::MemoryCache;
pub use noop::NoOpCache;
pub use traits::AppCache;

// Re-export config types
pub use crate::config::settings::{
    CacheBackend, CacheConfig, MemoryCacheConfig, RedisCacheConfig, UpdateCachePolicy,
};
