//! Result type alias for DocHarvest

use super::errors::HarvestError;

/// Result type alias for DocHarvest operations
///
/// # Examples
///
/// ```
/// use docharvest::domain::result::Result;
/// use docharvest::domain::errors::HarvestError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(HarvestError::Output("base directory is read-only".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, HarvestError>;
