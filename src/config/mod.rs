//! Configuration management for DocHarvest.
//!
//! DocHarvest uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DOCHARVEST_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docharvest::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("docharvest.toml")?;
//!
//! println!("Output: {}", config.output.base_directory);
//! println!("Dry run: {}", config.application.dry_run);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run mode
//! - [`SourceConfig`] - Database connection and pool settings
//! - [`OutputConfig`] - Base directory and category selection
//! - [`LoggingConfig`] - Optional rolling file logs
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! connection_string = "postgresql://ims:${DOCHARVEST_DB_PASSWORD}@db:5432/ims"
//!
//! [output]
//! base_directory = "./DownloadedDocuments"
//! categories = []
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{ApplicationConfig, HarvestConfig, LoggingConfig, OutputConfig, SourceConfig};
pub use secret::{redact_connection_string, secret_string, SecretString, SecretValue};
