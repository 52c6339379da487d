//! Structured export events
//!
//! The exporter reports progress through an [`EventSink`] instead of
//! printing. Every processed row produces exactly one
//! [`ExportEvent::RowFinished`].

use crate::domain::{Category, CategoryTally, ExportOutcome};

/// Something that happened while exporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    /// A category's export is starting
    CategoryStarted { category: Category },

    /// A row belongs to a different group than the row before it
    GroupChanged { category: Category, group: String },

    /// A row has been processed
    RowFinished {
        category: Category,
        row_index: u64,
        record: String,
        outcome: ExportOutcome,
    },

    /// The category stopped early; rows already processed keep their outcome
    CategoryAborted { category: Category, reason: String },

    /// The category finished, normally or after an abort
    CategoryFinished {
        category: Category,
        tally: CategoryTally,
    },
}

/// Receiver of export events
pub trait EventSink: Send + Sync {
    /// Handle one event
    fn emit(&self, event: &ExportEvent);
}

/// Renders export events as `tracing` log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    /// Create a new tracing event sink
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingEventSink {
    fn emit(&self, event: &ExportEvent) {
        match event {
            ExportEvent::CategoryStarted { category } => {
                tracing::info!(
                    category = %category,
                    "Processing {}",
                    category.display_name()
                );
            }
            ExportEvent::GroupChanged { category, group } => {
                tracing::info!(category = %category, group = %group, "Processing: {}", group);
            }
            ExportEvent::RowFinished {
                category,
                row_index,
                record,
                outcome,
            } => match outcome {
                ExportOutcome::Written { path, bytes } => {
                    let file_name = path
                        .file_name()
                        .map(|f| f.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    tracing::info!(
                        category = %category,
                        row = row_index,
                        path = %path.display(),
                        bytes = bytes,
                        "Downloaded: {} ({})",
                        file_name,
                        format_size(*bytes)
                    );
                }
                ExportOutcome::SkippedNoData => {
                    tracing::warn!(
                        category = %category,
                        row = row_index,
                        "Skipping {} - No file data",
                        record
                    );
                }
                ExportOutcome::SkippedMissingMetadata => {
                    tracing::warn!(
                        category = %category,
                        row = row_index,
                        "Skipping {} - Missing folder information",
                        record
                    );
                }
                ExportOutcome::Failed(reason) => {
                    tracing::error!(
                        category = %category,
                        row = row_index,
                        error = %reason,
                        "Error downloading {}",
                        record
                    );
                }
            },
            ExportEvent::CategoryAborted { category, reason } => {
                tracing::error!(
                    category = %category,
                    error = %reason,
                    "Error accessing {}",
                    category.display_name()
                );
            }
            ExportEvent::CategoryFinished { category, tally } => {
                tracing::info!(
                    category = %category,
                    total = tally.total,
                    succeeded = tally.succeeded,
                    failed = tally.failed,
                    skipped_no_data = tally.skipped_no_data,
                    skipped_missing_metadata = tally.skipped_missing_metadata,
                    errors = tally.errors,
                    bytes_written = tally.bytes_written,
                    "{} - Total: {}, Success: {}, Failed: {}",
                    category.display_name(),
                    tally.total,
                    tally.succeeded,
                    tally.failed
                );
            }
        }
    }
}

/// Human-readable size with 1024-based units
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::WINDOWS)
}
