//! Range and format checks applied after the layers are merged.
//!
//! Each check names the dotted settings path it rejects, so the error can be
//! traced back to a TOML key or `LEDGER_*` variable.

use crate::config::error::ConfigError;
use crate::config::settings::{
    CacheBackend, CacheConfig, DatabaseConfig, ServerConfig, Settings, StoreBackend,
};
use crate::logger::LoggerError;

fn ensure(ok: bool, field: &str, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::validation(field, message()))
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.port != 0, "server.port", || {
            "port 0 is reserved; choose 1-65535".to_string()
        })?;
        ensure(self.request_timeout > 0, "server.request_timeout", || {
            "must be at least one second".to_string()
        })
    }
}

impl DatabaseConfig {
    /// A postgres URL and a non-empty pool with `min <= max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(!self.url.is_empty(), "database.url", || {
            "required when store.backend = \"postgres\"".to_string()
        })?;
        ensure(
            ["postgres://", "postgresql://"]
                .iter()
                .any(|scheme| self.url.starts_with(scheme)),
            "database.url",
            || "expected postgres://[user:password@]host[:port]/database".to_string(),
        )?;
        ensure(self.max_connections > 0, "database.max_connections", || {
            "pool needs at least one connection".to_string()
        })?;
        ensure(self.min_connections > 0, "database.min_connections", || {
            "pool needs at least one connection".to_string()
        })?;
        ensure(
            self.min_connections <= self.max_connections,
            "database.min_connections",
            || {
                format!(
                    "{} exceeds max_connections {}",
                    self.min_connections, self.max_connections
                )
            },
        )
    }
}

impl From<LoggerError> for ConfigError {
    fn from(error: LoggerError) -> Self {
        match error {
            LoggerError::InvalidSetting { field, message } => ConfigError::validation(field, message),
            other => ConfigError::validation("logger", other.to_string()),
        }
    }
}

impl CacheConfig {
    /// Only the selected backend is checked, and only when caching is enabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        match self.backend {
            CacheBackend::Memory => ensure(self.memory.max_size > 0, "cache.memory.max_size", || {
                "an enabled memory cache must hold at least one entry".to_string()
            }),
            CacheBackend::Redis => {
                ensure(
                    self.redis.url.starts_with("redis://") || self.redis.url.starts_with("rediss://"),
                    "cache.redis.url",
                    || format!("'{}' is not a redis:// or rediss:// URL", self.redis.url),
                )?;
                ensure(self.redis.pool_size > 0, "cache.redis.pool_size", || {
                    "pool needs at least one connection".to_string()
                })
            }
        }
    }
}

impl Settings {
    /// First failing section wins. The database section only matters for the
    /// postgres store.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        if self.store.backend == StoreBackend::Postgres {
            self.database.validate()?;
        }
        self.logger.validate()?;
        self.cache.validate()
    }
}
