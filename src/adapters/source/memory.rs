//! In-memory row source
//!
//! Serves preloaded rows per category. Used to drive the exporter without a
//! database, and to simulate connection, query and mid-stream failures.

use super::{RowSource, RowStream};
use crate::domain::{Category, SourceError, SourceRow};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;

/// Row source backed by vectors of rows
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    rows: HashMap<Category, Vec<Result<SourceRow, SourceError>>>,
    open_failures: HashMap<Category, SourceError>,
    connection_failure: Option<SourceError>,
}

impl MemoryRowSource {
    /// Create a source with no rows in any category
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row to the stream of its category
    pub fn with_row(mut self, row: SourceRow) -> Self {
        self.rows.entry(row.category()).or_default().push(Ok(row));
        self
    }

    /// Append several rows, each to the stream of its category
    pub fn with_rows(self, rows: impl IntoIterator<Item = SourceRow>) -> Self {
        rows.into_iter().fold(self, Self::with_row)
    }

    /// Append an error item to the stream of `category`
    pub fn with_error(mut self, category: Category, error: SourceError) -> Self {
        self.rows.entry(category).or_default().push(Err(error));
        self
    }

    /// Make opening `category` fail
    pub fn failing_open(mut self, category: Category, error: SourceError) -> Self {
        self.open_failures.insert(category, error);
        self
    }

    /// Make the connection test fail
    pub fn unreachable(mut self, error: SourceError) -> Self {
        self.connection_failure = Some(error);
        self
    }
}

#[async_trait]
impl RowSource for MemoryRowSource {
    async fn test_connection(&self) -> Result<(), SourceError> {
        match &self.connection_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn open(&self, category: Category) -> Result<RowStream, SourceError> {
        if let Some(err) = self.open_failures.get(&category) {
            return Err(err.clone());
        }

        let rows = self.rows.get(&category).cloned().unwrap_or_default();
        Ok(stream::iter(rows).boxed())
    }
}
