use clap::Parser;

use ledger_rs::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (settings, environment) = match load_and_merge_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    let _log_handle = match init_logger_from_settings(&settings) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = execute_command(&cli, settings, environment).await {
        tracing::error!(error = %e.chain_message(), "Command failed");
        eprintln!("Error: {}", e.chain_message());
        std::process::exit(1);
    }
}
