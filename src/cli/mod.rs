//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for DocHarvest using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// DocHarvest - Export stored documents from a GRC database to folders
#[derive(Parser, Debug)]
#[command(name = "docharvest")]
#[command(version, about, long_about = None)]
#[command(author = "DocHarvest Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "docharvest.toml", env = "DOCHARVEST_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DOCHARVEST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export documents of the selected categories to the output folder
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// List the document categories
    Categories(commands::categories::CategoriesArgs),
}

impl Commands {
    /// Whether the command reads the configuration file
    pub fn needs_config(&self) -> bool {
        matches!(self, Commands::Export(_) | Commands::ValidateConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["docharvest", "export"]);
        assert_eq!(cli.config, "docharvest.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
        assert!(cli.command.needs_config());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["docharvest", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["docharvest", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["docharvest", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["docharvest", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
        assert!(!cli.command.needs_config());
    }

    #[test]
    fn test_cli_parse_categories() {
        let cli = Cli::parse_from(["docharvest", "categories"]);
        assert!(matches!(cli.command, Commands::Categories(_)));
        assert!(!cli.command.needs_config());
    }
}
