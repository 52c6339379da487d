// DocHarvest - GRC Document Export Tool
// Copyright (c) 2025 DocHarvest Contributors
// Licensed under the MIT License

//! # DocHarvest - GRC Document Export
//!
//! DocHarvest exports documents stored as binary columns in a governance,
//! risk and compliance (GRC) database into a browsable folder tree, one
//! tree per document category.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** category rows from PostgreSQL as a stream
//! - **Naming** each document: sanitized folders, a resolved extension and a
//!   collision-free file name
//! - **Writing** documents atomically to the local filesystem
//! - **Reporting** per-row outcomes and per-category tallies
//!
//! ## Architecture
//!
//! DocHarvest follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Naming rules and the export pipeline
//! - [`adapters`] - Row sources (PostgreSQL, in-memory) and the file sink
//! - [`domain`] - Categories, rows, outcomes and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docharvest::config::load_config;
//! use docharvest::core::export::RunCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("docharvest.toml")?;
//!
//!     let coordinator = RunCoordinator::from_config(&config)?;
//!     let summary = coordinator.execute().await?;
//!
//!     println!("Wrote {} documents", summary.totals().succeeded);
//!     Ok(())
//! }
//! ```
//!
//! ## Naming
//!
//! Folder and file names are derived from row metadata and made safe for
//! every common filesystem:
//!
//! ```rust
//! use docharvest::core::naming::{resolve_extension, sanitize_folder_name};
//!
//! assert_eq!(sanitize_folder_name("R-12: Vendor / Supplier"), "R-12_ Vendor _ Supplier");
//! assert_eq!(sanitize_folder_name("   "), "Unknown");
//!
//! let ext = resolve_extension(Some("Minutes"), None, None, b"%PDF-1.7", ".docx");
//! assert_eq!(ext, ".pdf");
//! ```
//!
//! ## Error Handling
//!
//! Run-level failures use [`domain::HarvestError`]. Row and category
//! failures never propagate; they end up in the
//! [`RunSummary`](core::export::RunSummary).

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
