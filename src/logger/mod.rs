//! Logger Module
//!
//! A logging system based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output in Full, Compact or JSON format
//! - Changing the filter at runtime through [`LogLevelHandle`]

pub mod config;
pub mod error;

pub use config::*;
pub use error::LoggerError;

use std::fs::{self, File, OpenOptions};
use std::io::IsTerminal;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

type FilteredRegistry = tracing_subscriber::layer::Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Handle for changing the active log filter after initialization
#[derive(Clone)]
pub struct LogLevelHandle {
    pub(crate) inner: Arc<reload::Handle<EnvFilter, Registry>>,
}

impl LogLevelHandle {
    /// Replace the active filter. Accepts a level or any `EnvFilter` directive.
    pub fn set_level(&self, level: &str) -> Result<(), LoggerError> {
        let filter = EnvFilter::try_new(level).map_err(|e| LoggerError::Filter {
            directive: level.to_string(),
            message: e.to_string(),
        })?;
        self.inner
            .reload(filter)
            .map_err(|e| LoggerError::reload(e.to_string()))?;
        tracing::info!(level = %level, "Log level updated");
        Ok(())
    }

    /// The active filter rendered as a directive string
    pub fn current_level(&self) -> Option<String> {
        self.inner.with_current(|filter| filter.to_string()).ok()
    }
}

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: &LoggerConfig) -> Result<LogLevelHandle, LoggerError> {
    config.validate()?;

    let level = LevelFilter::from_level(config.level()?);
    let filter = EnvFilter::default().add_directive(level.into());
    let (filter_layer, reload_handle) = reload::Layer::new(filter);

    // File layer first; ANSI formatting from the console layer must not reach the file.
    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(layers)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInstalled(e.to_string()))?;

    Ok(LogLevelHandle {
        inner: Arc::new(reload_handle),
    })
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();
    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = Mutex::new(open_log_file(config)?);
    let layer = match config.format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    };
    Ok(layer)
}

fn open_log_file(config: &FileConfig) -> Result<File, LoggerError> {
    if let Some(parent) = config.path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if config.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    Ok(options.open(&config.path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn with_test_handle<F, R>(initial_level: &str, f: F) -> R
    where
        F: FnOnce(&LogLevelHandle) -> R,
    {
        let filter = EnvFilter::try_new(initial_level).unwrap_or_else(|_| EnvFilter::new("info"));
        let (filter_layer, reload_handle) = reload::Layer::new(filter);
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt::layer().with_writer(std::io::sink));

        let handle = LogLevelHandle {
            inner: Arc::new(reload_handle),
        };
        tracing::subscriber::with_default(subscriber, || f(&handle))
    }

    #[test]
    fn test_invalid_directive_is_rejected() {
        with_test_handle("info", |handle| {
            let err = handle.set_level("ledger_rs=loud").unwrap_err();
            assert!(matches!(err, LoggerError::Filter { .. }));
            assert_eq!(handle.current_level().as_deref(), Some("info"));
        });
    }

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig {
            enabled: true,
            path: dir.path().join("nested/deeper/app.log"),
            append: true,
            format: LogFormat::Compact,
        };
        open_log_file(&config).unwrap();
        assert!(config.path.exists());
    }

    #[test]
    fn test_open_log_file_truncates_when_not_appending() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("app.log");
        fs::write(&path, "stale line\n").unwrap();

        let config = FileConfig {
            enabled: true,
            path: path.clone(),
            append: false,
            format: LogFormat::Full,
        };
        open_log_file(&config).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    proptest! {
        #[test]
        fn property_valid_level_update_is_reflected(level_idx in 0usize..5usize) {
            let levels = ["trace", "debug", "info", "warn", "error"];
            let new_level = levels[level_idx];
            let initial = if level_idx == 0 { "info" } else { "trace" };

            with_test_handle(initial, |handle| {
                prop_assert!(handle.set_level(new_level).is_ok());
                let current = handle.current_level().unwrap_or_default();
                prop_assert!(current.to_lowercase().contains(new_level));
                Ok(())
            })?;
        }

        #[test]
        fn property_last_update_wins(indices in prop::collection::vec(0usize..5usize, 2..5)) {
            let levels = ["trace", "debug", "info", "warn", "error"];

            with_test_handle("info", |handle| {
                for &idx in &indices {
                    prop_assert!(handle.set_level(levels[idx]).is_ok());
                }
                let last = levels[*indices.last().unwrap()];
                let current = handle.current_level().unwrap_or_default();
                prop_assert!(current.to_lowercase().contains(last));
                Ok(())
            })?;
        }

        #[test]
        fn property_module_directives_are_accepted(
            base_idx in 0usize..5usize,
            module_idx in 0usize..5usize,
        ) {
            let levels = ["trace", "debug", "info", "warn", "error"];
            let directive = format!("{},ledger_rs={}", levels[base_idx], levels[module_idx]);

            with_test_handle("info", |handle| {
                prop_assert!(handle.set_level(&directive).is_ok());
                Ok(())
            })?;
        }
    }
}
