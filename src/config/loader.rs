//! Configuration loader for ledger-rs
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
pub(crate) const CONFIG_DIR_ENV: &str = "LEDGER_CONFIG_DIR";

/// Environment variable for specific configuration file
pub(crate) const CONFIG_FILE_ENV: &str = "LEDGER_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "LEDGER";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `LEDGER_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// Reads `LEDGER_CONFIG_DIR`, `LEDGER_CONFIG_FILE` and `LEDGER_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `LEDGER_CONFIG_DIR` and `LEDGER_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file_var = std::env::var(CONFIG_FILE_ENV).ok();

        if let (Some(dir), Some(file)) = (&config_dir_var, &config_file_var) {
            return Err(ConfigError::ConflictingSources {
                dir: dir.clone(),
                file: file.clone(),
            });
        }
        let config_file = config_file_var.map(PathBuf::from);

        let config_dir = config_dir_var
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load a single file instead of the layered directory
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the environment read from `LEDGER_APP_ENV`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load and validate configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` (or the single configured file) is not found
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::Parse(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // LEDGER_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(&self, builder: Builder) -> Result<Builder, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self.config_dir.join(self.environment.overlay_file());
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(builder: Builder, path: &Path, required: bool) -> Result<Builder, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let Some(path_str) = path.to_str() else {
            return Err(ConfigError::Parse(format!(
                "Configuration path is not valid UTF-8: {}",
                path.display()
            )));
        };

        Ok(builder.add_source(File::new(path_str, FileFormat::Toml).required(required)))
    }

    /// `LEDGER_DATABASE__URL` -> `database.url`
    fn add_env_source(builder: Builder) -> Builder {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::settings::{StoreBackend, UpdateCachePolicy};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching process environment run one at a time.
    pub(crate) static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const BASE_CONFIG: &str = r#"
[application]
name = "test-ledger"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 3000

[database]
url = "postgres://localhost/ledger_test"
max_connections = 10
min_connections = 1

[logger]
level = "info"

[logger.console]
enabled = true
colored = false
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores touched environment variables on drop
    pub(crate) struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        pub(crate) fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        pub(crate) fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        pub(crate) fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }

        /// Clear every variable the loader reads
        pub(crate) fn clear_ledger_vars(&mut self) {
            for key in [
                CONFIG_DIR_ENV,
                CONFIG_FILE_ENV,
                AppEnvironment::ENV_VAR,
                "LEDGER_SERVER__PORT",
                "LEDGER_DATABASE__URL",
                "LEDGER_CACHE__ENABLED",
                "LEDGER_CACHE__UPDATE_POLICY",
            ] {
                self.remove(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_config_loader_new_default() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_ledger_vars();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::ConflictingSources { dir, file }) => {
                assert_eq!(dir, "/custom/config");
                assert_eq!(file, "/path/to/config.toml");
            }
            other => panic!("Expected ConflictingSources, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_ledger_vars();
        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let result = ConfigLoader::new().unwrap().load();
        match result {
            Err(ConfigError::MissingFile(path)) => assert!(path.ends_with("default.toml")),
            other => panic!("Expected MissingFile, got {other:?}"),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_ledger_vars();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.application.name, "test-ledger");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.store.backend, StoreBackend::Postgres);
        assert!(!settings.cache.enabled);
    }

    #[test]
    fn test_full_precedence_chain() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_ledger_vars();

        let production = "[server]\nport = 8080\n\n[database]\nurl = \"postgres://prod/ledger\"\n";
        let local = "[database]\nurl = \"postgres://local/ledger\"\n";
        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("production.toml", production),
            ("local.toml", local),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "production");
        env.set("LEDGER_CACHE__ENABLED", "true");
        env.set("LEDGER_CACHE__UPDATE_POLICY", "overwrite");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.url, "postgres://local/ledger");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert!(settings.cache.enabled);
        assert_eq!(settings.cache.update_policy, UpdateCachePolicy::Overwrite);
    }

    #[test]
    fn test_env_var_overrides_file() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_ledger_vars();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("LEDGER_SERVER__PORT", "4000");
        env.set("LEDGER_DATABASE__URL", "postgres://env-override/db");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.database.url, "postgres://env-override/db");
    }

    #[test]
    fn test_with_overrides_take_precedence_over_env() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_ledger_vars();

        let single = "[store]\nbackend = \"memory\"\n\n[server]\nport = 5000\n";
        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("test.toml", "[server]\nport = 7000\n"),
            ("single.toml", single),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new()
            .unwrap()
            .with_environment(AppEnvironment::Test)
            .load()
            .unwrap();
        assert_eq!(settings.server.port, 7000);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("single.toml"))
            .load()
            .unwrap();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_invalid_settings_fail_validation() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_ledger_vars();
        let temp_dir = setup_config_dir(&[("default.toml", "[server]\nport = 0\n")]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let result = ConfigLoader::new().unwrap().load();
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
