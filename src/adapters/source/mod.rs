//! Row sources
//!
//! A [`RowSource`] turns a category into a lazy stream of decoded rows. The
//! exporter consumes the stream one row at a time and never buffers it.

pub mod memory;
pub mod queries;

pub use memory::MemoryRowSource;

use crate::domain::{Category, SourceError, SourceRow};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Lazily fetched rows of one category
///
/// An `Err` item for which [`SourceError::is_row_level`] holds costs only
/// that row; any other error ends the category.
pub type RowStream = BoxStream<'static, Result<SourceRow, SourceError>>;

/// Provider of category row streams
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Check that the source is reachable
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ConnectionFailed`] if it is not.
    async fn test_connection(&self) -> Result<(), SourceError>;

    /// Start streaming the rows of `category`
    ///
    /// # Errors
    ///
    /// Returns an error if the category query cannot be executed.
    async fn open(&self, category: Category) -> Result<RowStream, SourceError>;
}
