//! Typed view of the layered configuration.
//!
//! Every section uses container-level `#[serde(default)]`, so a TOML file or
//! `LEDGER_*` variable only needs to name the values it changes.

use serde::{Deserialize, Serialize};

pub use crate::logger::LoggerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub name: String,
    /// Reported by `/health`; defaults to the crate version
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "ledger-rs".to_string(),
            version: crate::pkg_version().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds before a request is answered with 408
    pub request_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout: 30,
        }
    }
}

/// PostgreSQL pool, read only when `store.backend = "postgres"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Pool checkout timeout in seconds
    pub connection_timeout: u64,
    /// Apply pending migrations before serving
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connection_timeout: 30,
            auto_migrate: false,
        }
    }
}

/// Where entries and audit logs are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local maps, lost on restart
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Postgres => "postgres",
            StoreBackend::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
}

/// How a successful update refreshes the cached entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpdateCachePolicy {
    /// Remove the key, then store the fresh value
    #[default]
    RemoveThenSet,
    /// Store the fresh value over the old one
    Overwrite,
    /// Remove the key and let the next read repopulate it
    Invalidate,
}

const DEFAULT_CACHE_TTL: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryCacheConfig {
    pub max_size: usize,
    /// Seconds; 0 keeps entries until removed or evicted
    pub ttl_seconds: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_size: 1000,
            ttl_seconds: DEFAULT_CACHE_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisCacheConfig {
    pub url: String,
    /// Seconds; 0 keeps keys until removed
    pub ttl_seconds: u64,
    pub pool_size: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
    /// Keys are stored as `{key_prefix}:{cache_name}:{id}`
    pub key_prefix: String,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            ttl_seconds: DEFAULT_CACHE_TTL,
            pool_size: 4,
            connection_timeout: 5,
            key_prefix: "ledger".to_string(),
        }
    }
}

/// Disabled unless `enabled = true`; a disabled cache misses every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub backend: CacheBackend,
    pub update_policy: UpdateCachePolicy,
    pub memory: MemoryCacheConfig,
    pub redis: RedisCacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub application: ApplicationConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub store: StoreConfig,
    pub logger: LoggerConfig,
    pub cache: CacheConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogFormat;
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![
                Just("127.0.0.1".to_string()),
                Just("0.0.0.0".to_string()),
                Just("localhost".to_string()),
            ],
            1u16..=65535u16,
            1u64..=300u64,
        )
            .prop_map(|(host, port, request_timeout)| ServerConfig {
                host,
                port,
                request_timeout,
            })
    }

    fn arb_cache_config() -> impl Strategy<Value = CacheConfig> {
        (
            any::<bool>(),
            prop_oneof![Just(CacheBackend::Memory), Just(CacheBackend::Redis)],
            prop_oneof![
                Just(UpdateCachePolicy::RemoveThenSet),
                Just(UpdateCachePolicy::Overwrite),
                Just(UpdateCachePolicy::Invalidate),
            ],
            1usize..=10_000usize,
            0u64..=3600u64,
        )
            .prop_map(
                |(enabled, backend, update_policy, max_size, ttl_seconds)| CacheConfig {
                    enabled,
                    backend,
                    update_policy,
                    memory: MemoryCacheConfig {
                        max_size,
                        ttl_seconds,
                    },
                    redis: RedisCacheConfig {
                        ttl_seconds,
                        ..Default::default()
                    },
                },
            )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Any combination of cache settings written as TOML loads back unchanged.
        #[test]
        fn prop_cache_section_survives_toml(cache in arb_cache_config(), server in arb_server_config()) {
            let settings = Settings { cache, server, ..Default::default() };
            let toml_str = toml::to_string(&settings).expect("Settings should serialize to TOML");
            let parsed: Settings = toml::from_str(&toml_str).expect("TOML should deserialize");
            prop_assert_eq!(settings.cache, parsed.cache);
            prop_assert_eq!(settings.server.address(), parsed.server.address());
        }
    }

    #[test]
    fn test_application_config_defaults() {
        let config = ApplicationConfig::default();
        assert_eq!(config.name, "ledger-rs");
        assert_eq!(config.version, crate::pkg_version());
    }

    #[test]
    fn test_server_config_address() {
        let config = ServerConfig::default();
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.store.backend, StoreBackend::Postgres);
        assert!(!settings.cache.enabled);
        assert_eq!(settings.cache.update_policy, UpdateCachePolicy::RemoveThenSet);
        assert_eq!(settings.cache.redis.key_prefix, "ledger");
        assert_eq!(settings.logger.level, "info");
    }

    #[test]
    fn test_update_policy_uses_snake_case() {
        let settings: Settings = toml::from_str(
            r#"
[cache]
enabled = true
backend = "redis"
update_policy = "remove_then_set"
"#,
        )
        .unwrap();
        assert_eq!(settings.cache.backend, CacheBackend::Redis);
        assert_eq!(settings.cache.update_policy, UpdateCachePolicy::RemoveThenSet);

        let settings: Settings =
            toml::from_str("[cache]\nupdate_policy = \"invalidate\"\n").unwrap();
        assert_eq!(settings.cache.update_policy, UpdateCachePolicy::Invalidate);

        assert!(toml::from_str::<Settings>("[cache]\nupdate_policy = \"lazy\"\n").is_err());
    }

    #[test]
    fn test_store_backend_parses_memory() {
        let settings: Settings = toml::from_str("[store]\nbackend = \"memory\"\n").unwrap();
        assert_eq!(settings.store.backend, StoreBackend::Memory);
        assert_eq!(settings.store.backend.as_str(), "memory");
    }

    #[test]
    fn test_logger_section_reaches_runtime_config() {
        let settings: Settings = toml::from_str(
            r#"
[logger]
level = "debug"

[logger.file]
enabled = true
format = "compact"
"#,
        )
        .unwrap();
        assert_eq!(settings.logger.level, "debug");
        assert!(settings.logger.file.enabled);
        assert_eq!(settings.logger.file.format, LogFormat::Compact);
        assert!(settings.logger.console.enabled);
    }
}
