//! External system integrations for DocHarvest.
//!
//! - [`source`] - The [`RowSource`](source::RowSource) seam, category
//!   queries and an in-memory source
//! - [`postgresql`] - PostgreSQL row source
//! - [`filesystem`] - The [`DocumentSink`](filesystem::DocumentSink) seam
//!   and the local file sink
//!
//! # Design Pattern
//!
//! Adapters isolate the database and the filesystem behind traits so the
//! export pipeline can be tested against in-memory sources and temporary
//! directories.
//!
//! ```rust,no_run
//! use docharvest::adapters::postgresql::PostgresRowSource;
//! use docharvest::adapters::source::RowSource;
//! use docharvest::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("docharvest.toml")?;
//! let source = PostgresRowSource::new(&config.source)?;
//! source.test_connection().await?;
//! # Ok(())
//! # }
//! ```

pub mod filesystem;
pub mod postgresql;
pub mod source;
