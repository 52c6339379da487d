//! Core business logic for DocHarvest.
//!
//! # Modules
//!
//! - [`naming`] - Folder/file name sanitization, extension inference and unique paths
//! - [`export`] - Category descriptors, the generic exporter and run coordination
//!
//! # Export Workflow
//!
//! 1. **Connect**: Check that the row source is reachable
//! 2. **Prepare**: Create the base output directory
//! 3. **Export**: For each category, stream its rows and write one file per row
//! 4. **Report**: Build a summary of every category's tally
//!
//! # Example
//!
//! ```rust,no_run
//! use docharvest::config::load_config;
//! use docharvest::core::export::RunCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("docharvest.toml")?;
//! let coordinator = RunCoordinator::from_config(&config)?;
//! let summary = coordinator.execute().await?;
//!
//! let totals = summary.totals();
//! println!("Total: {}", totals.total);
//! println!("Success: {}", totals.succeeded);
//! println!("Failed: {}", totals.failed);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod naming;
