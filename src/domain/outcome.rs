//! Per-row outcomes and per-category tallies

use std::path::PathBuf;

/// Result of processing one source row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The payload was written to `path`
    Written { path: PathBuf, bytes: u64 },

    /// The blob column was NULL or empty
    SkippedNoData,

    /// Folder metadata required to place the document was blank
    SkippedMissingMetadata,

    /// The row could not be decoded, placed or written
    Failed(String),
}

impl ExportOutcome {
    /// Whether the outcome counts as a success in the tally
    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Written { .. })
    }
}

/// Running counts for one category
///
/// Counts only ever grow. `succeeded + failed == total` after every
/// [`record`](CategoryTally::record).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTally {
    /// Rows seen, including undecodable ones
    pub total: u64,

    /// Documents written
    pub succeeded: u64,

    /// Rows that did not produce a document
    pub failed: u64,

    /// Failed rows without payload
    pub skipped_no_data: u64,

    /// Failed rows without folder metadata
    pub skipped_missing_metadata: u64,

    /// Failed rows with a decode or write error
    pub errors: u64,

    /// Payload bytes written
    pub bytes_written: u64,
}

impl CategoryTally {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one outcome
    pub fn record(&mut self, outcome: &ExportOutcome) {
        self.total += 1;
        match outcome {
            ExportOutcome::Written { bytes, .. } => {
                self.succeeded += 1;
                self.bytes_written += bytes;
            }
            ExportOutcome::SkippedNoData => {
                self.failed += 1;
                self.skipped_no_data += 1;
            }
            ExportOutcome::SkippedMissingMetadata => {
                self.failed += 1;
                self.skipped_missing_metadata += 1;
            }
            ExportOutcome::Failed(_) => {
                self.failed += 1;
                self.errors += 1;
            }
        }
    }

    /// Add another tally into this one
    pub fn merge(&mut self, other: &CategoryTally) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.skipped_no_data += other.skipped_no_data;
        self.skipped_missing_metadata += other.skipped_missing_metadata;
        self.errors += other.errors;
        self.bytes_written += other.bytes_written;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_new_is_empty() {
        let tally = CategoryTally::new();
        assert_eq!(tally.total, 0);
        assert_eq!(tally.succeeded, 0);
        assert_eq!(tally.failed, 0);
    }

    #[test]
    fn test_tally_record_each_outcome() {
        let mut tally = CategoryTally::new();
        tally.record(&ExportOutcome::Written {
            path: PathBuf::from("Risk/a.pdf"),
            bytes: 100,
        });
        tally.record(&ExportOutcome::SkippedNoData);
        tally.record(&ExportOutcome::SkippedMissingMetadata);
        tally.record(&ExportOutcome::Failed("disk full".to_string()));

        assert_eq!(tally.total, 4);
        assert_eq!(tally.succeeded, 1);
        assert_eq!(tally.failed, 3);
        assert_eq!(tally.skipped_no_data, 1);
        assert_eq!(tally.skipped_missing_metadata, 1);
        assert_eq!(tally.errors, 1);
        assert_eq!(tally.bytes_written, 100);
        assert_eq!(tally.succeeded + tally.failed, tally.total);
    }

    #[test]
    fn test_tally_merge() {
        let mut a = CategoryTally::new();
        a.record(&ExportOutcome::Written {
            path: PathBuf::from("x"),
            bytes: 10,
        });

        let mut b = CategoryTally::new();
        b.record(&ExportOutcome::Written {
            path: PathBuf::from("y"),
            bytes: 5,
        });
        b.record(&ExportOutcome::SkippedNoData);

        a.merge(&b);
        assert_eq!(a.total, 3);
        assert_eq!(a.succeeded, 2);
        assert_eq!(a.failed, 1);
        assert_eq!(a.bytes_written, 15);
    }

    #[test]
    fn test_outcome_is_success() {
        assert!(ExportOutcome::Written {
            path: PathBuf::from("x"),
            bytes: 0
        }
        .is_success());
        assert!(!ExportOutcome::SkippedNoData.is_success());
        assert!(!ExportOutcome::Failed("x".to_string()).is_success());
    }
}
