//! Logging
//!
//! Console logging through `tracing`, with optional JSON log files rotated
//! by `tracing-appender`.
//!
//! # Example
//!
//! ```no_run
//! use docharvest::logging::init_logging;
//! use docharvest::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use docharvest::log_error_with_context;
/// use docharvest::domain::HarvestError;
///
/// let error = HarvestError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
