//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Ledger entry service with a cache-aside read path and an audit trail
#[derive(Parser, Debug)]
#[command(name = "ledger-rs")]
#[command(about = "Ledger entry service with a cache-aside read path and an audit trail")]
#[command(long_about = "
ledger-rs serves ledger entries over HTTP. Reads are answered from a cache
(in-process or Redis) and fall back to PostgreSQL; every operation is recorded
in an audit log.

EXAMPLES:
    # Start the server with default configuration
    ledger-rs serve

    # Start server on custom host and port
    ledger-rs serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    ledger-rs --config /path/to/config.toml serve

    # Load config/production.toml on top of the defaults
    ledger-rs --env production serve

    # Check configuration without starting server
    ledger-rs serve --dry-run

    # Run database migrations
    ledger-rs migrate

    # Rollback last 2 migrations
    ledger-rs migrate --rollback 2
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered files under `config/`.
    /// `LEDGER_*` environment variables still apply on top.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection (otherwise `LEDGER_APP_ENV`)
    ///
    /// Available values: development (dev), test, staging, production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   ledger-rs serve                           # Start with defaults
    ///   ledger-rs serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   ledger-rs serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override; wins over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Examples:
    ///   ledger-rs migrate                    # Apply all pending migrations
    ///   ledger-rs migrate --dry-run          # Show pending migrations without applying
    ///   ledger-rs migrate --rollback 3       # Rollback the last 3 migrations
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Serve {
            host: None,
            port: None,
            log_level: None,
            dry_run: false,
        }
    }
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(alias = "dev")]
    Development,
    Test,
    Staging,
    #[value(alias = "prod")]
    Production,
}

/// Level accepted by `serve --log-level`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    /// The subcommand to run, defaulting to `serve`.
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }

    /// Argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }
        if let Some(Commands::Migrate {
            dry_run: true,
            rollback: Some(_),
        }) = self.command
        {
            return Err("Cannot use --dry-run and --rollback together".to_string());
        }
        Ok(())
    }
}

impl LogLevel {
    /// Directive string understood by the logger settings.
    pub fn as_str(self) -> &'static str {
        const NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
        NAMES[self as usize]
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        use crate::config::Environment as Config;
        match env {
            Environment::Development => Config::Development,
            Environment::Test => Config::Test,
            Environment::Staging => Config::Staging,
            Environment::Production => Config::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["ledger-rs", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["ledger-rs", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["ledger-rs"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.command_or_default(), Commands::default());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_serve_command() {
        let cli =
            Cli::try_parse_from(["ledger-rs", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(8080),
                log_level: None,
                dry_run: false,
            })
        );
    }

    #[test]
    fn test_migrate_command() {
        let cli = Cli::try_parse_from(["ledger-rs", "migrate", "--rollback", "2"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Migrate {
                dry_run: false,
                rollback: Some(2),
            })
        );
    }

    #[test]
    fn test_env_aliases() {
        let cli = Cli::try_parse_from(["ledger-rs", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));
        let env: crate::config::Environment = Environment::Staging.into();
        assert_eq!(env, crate::config::Environment::Staging);
    }

    #[test]
    fn test_log_level_names_match_clap_values() {
        for level in LogLevel::value_variants() {
            let value = level.to_possible_value().unwrap();
            assert_eq!(value.get_name(), level.as_str());
        }
        let cli = Cli::try_parse_from(["ledger-rs", "serve", "--log-level", "warning"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Serve { log_level: Some(LogLevel::Warn), .. })
        ));
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["ledger-rs", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_conflicting_migrate_flags() {
        let err = Cli::try_parse_from(["ledger-rs", "migrate", "--dry-run", "--rollback", "1"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
