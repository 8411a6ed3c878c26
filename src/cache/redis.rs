//! Redis backend over a bb8 pool of multiplexed connections.
//!
//! Keys are namespaced as `{key_prefix}:{cache_name}:{key}` so several
//! caches (or several deployments) can share one Redis database.

use std::time::Duration;

use async_trait::async_trait;
use bb8::Pool;
use redis::{Client, Cmd, FromRedisValue};

use crate::cache::{AppCache, CacheError};
use crate::config::settings::RedisCacheConfig;

pub struct RedisCache {
    pool: Pool<Client>,
    namespace: String,
    /// 0 keeps keys until they are removed
    ttl_seconds: u64,
}

impl RedisCache {
    /// Opens the pool; fails fast when the URL is malformed or no connection
    /// can be established within `connection_timeout`.
    pub async fn new(config: &RedisCacheConfig, cache_name: &str) -> Result<Self, CacheError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| CacheError::Connection(e.to_string()))?;
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout))
            .build(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            namespace: namespace(&config.key_prefix, cache_name),
            ttl_seconds: config.ttl_seconds,
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    async fn query<T: FromRedisValue>(&self, cmd: Cmd) -> Result<T, CacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        cmd.query_async(&mut *conn)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))
    }
}

fn namespace(key_prefix: &str, cache_name: &str) -> String {
    format!("{}:{}", key_prefix, cache_name)
}

/// `SET key value`, with `EX ttl` when a TTL is configured.
fn set_command(key: String, value: String, ttl_seconds: u64) -> Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(value);
    if ttl_seconds > 0 {
        cmd.arg("EX").arg(ttl_seconds);
    }
    cmd
}

#[async_trait]
impl AppCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(self.key(key));
        self.query(cmd).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.query(set_command(self.key(key), value, self.ttl_seconds))
            .await
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(self.key(key));
        self.query(cmd).await
    }
}
