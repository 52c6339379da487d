// DocHarvest - GRC Document Export Tool
// Copyright (c) 2025 DocHarvest Contributors
// Licensed under the MIT License

use docharvest::cli::{Cli, Commands};
use docharvest::config::{load_config, HarvestConfig};
use docharvest::domain::Result;
use docharvest::log_error_with_context;
use docharvest::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let loaded = cli
        .command
        .needs_config()
        .then(|| load_config(&cli.config));

    // --log-level wins, then the configuration file, then "info"
    let config = loaded.as_ref().and_then(|r| r.as_ref().ok());
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config.map(|c| c.logging.clone()).unwrap_or_default();

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "DocHarvest - GRC Document Export Tool"
    );

    let exit_code = match execute_command(&cli, loaded).await {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    loaded: Option<Result<HarvestConfig>>,
) -> anyhow::Result<i32> {
    let loaded = || loaded.unwrap_or_else(|| load_config(&cli.config));
    match &cli.command {
        Commands::Export(args) => args.execute(loaded()).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config, loaded()).await,
        Commands::Init(args) => args.execute().await,
        Commands::Categories(args) => args.execute().await,
    }
}
