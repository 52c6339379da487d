//! Domain error types
//!
//! This module defines the error hierarchy for DocHarvest.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main DocHarvest error type
///
/// Returned by run-level operations. Row-level and category-level problems
/// are reported as outcomes in the run summary instead of propagating.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Row source errors (database connection, queries, decoding)
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Output directory errors
    #[error("Output error: {0}")]
    Output(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Row source errors
///
/// The variant decides how far a failure reaches: decode failures cost one
/// row, everything else costs the whole category (or the run, for
/// connection failures at startup).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The data source cannot be reached
    #[error("Failed to connect to data source: {0}")]
    ConnectionFailed(String),

    /// The category query could not be executed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The row stream broke while fetching
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// A single row could not be decoded
    #[error("Failed to decode row: column '{column}': {message}")]
    DecodeFailed { column: String, message: String },
}

impl SourceError {
    /// Whether the error only affects the row it occurred on
    pub fn is_row_level(&self) -> bool {
        matches!(self, SourceError::DecodeFailed { .. })
    }
}

impl From<std::io::Error> for HarvestError {
    fn from(err: std::io::Error) -> Self {
        HarvestError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for HarvestError {
    fn from(err: toml::de::Error) -> Self {
        HarvestError::Configuration(format!("TOML parse error: {err}"))
    }
}
