//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the DocHarvest configuration file.

use crate::config::{redact_connection_string, HarvestConfig};
use crate::domain::Result;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded configuration is a valid one.
    pub async fn execute(&self, config_path: &str, loaded: Result<HarvestConfig>) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match loaded {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let categories = match config.output.selected_categories() {
            Ok(categories) => categories,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!(
            "  Source: {}",
            redact_connection_string(&config.source.connection_string)
        );
        println!("  Max Connections: {}", config.source.max_connections);
        println!("  SSL Mode: {}", config.source.ssl_mode);
        println!(
            "  Statement Timeout: {}s",
            config.source.statement_timeout_seconds
        );
        println!("  Output: {}", config.output.base_directory);
        println!(
            "  Categories: {}",
            categories
                .iter()
                .map(|c| c.key())
                .collect::<Vec<_>>()
                .join(", ")
        );
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
