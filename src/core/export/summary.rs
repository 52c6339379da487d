//! Run summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{Category, CategoryTally};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// How a category's export ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryStatus {
    /// Every row of the stream was processed
    Completed,

    /// The category stopped early for the given reason
    Aborted(String),
}

/// Result of exporting one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    /// Category the report is for
    pub category: Category,

    /// Row counts
    pub tally: CategoryTally,

    /// Whether the category ran to completion
    pub status: CategoryStatus,
}

impl CategoryReport {
    /// Report for a category that completed
    pub fn completed(category: Category, tally: CategoryTally) -> Self {
        Self {
            category,
            tally,
            status: CategoryStatus::Completed,
        }
    }

    /// Report for a category that was aborted
    pub fn aborted(category: Category, tally: CategoryTally, reason: impl Into<String>) -> Self {
        Self {
            category,
            tally,
            status: CategoryStatus::Aborted(reason.into()),
        }
    }

    /// Reason the category was aborted, if it was
    pub fn abort_reason(&self) -> Option<&str> {
        match &self.status {
            CategoryStatus::Aborted(reason) => Some(reason),
            CategoryStatus::Completed => None,
        }
    }
}

/// Summary of a whole export run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Folder the documents were exported to
    pub base_directory: PathBuf,

    /// Whether the run only planned documents without writing them
    pub dry_run: bool,

    /// One report per category, in run order
    pub reports: Vec<CategoryReport>,
}

impl RunSummary {
    /// Create an empty summary
    pub fn new(base_directory: PathBuf, dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            base_directory,
            dry_run,
            reports: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add a category report
    pub fn add_report(&mut self, report: CategoryReport) {
        self.reports.push(report);
    }

    /// Report for `category`, if it ran
    pub fn report(&self, category: Category) -> Option<&CategoryReport> {
        self.reports.iter().find(|r| r.category == category)
    }

    /// Tallies of all categories added together
    pub fn totals(&self) -> CategoryTally {
        let mut totals = CategoryTally::new();
        for report in &self.reports {
            totals.merge(&report.tally);
        }
        totals
    }

    /// Categories that stopped early
    pub fn aborted(&self) -> impl Iterator<Item = &CategoryReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, CategoryStatus::Aborted(_)))
    }

    /// Whether every row was written and no category was aborted
    pub fn is_successful(&self) -> bool {
        self.totals().failed == 0 && self.aborted().next().is_none()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        let totals = self.totals();
        tracing::info!(
            categories = self.reports.len(),
            total = totals.total,
            succeeded = totals.succeeded,
            failed = totals.failed,
            bytes_written = totals.bytes_written,
            duration_secs = self.duration.as_secs(),
            dry_run = self.dry_run,
            base_directory = %self.base_directory.display(),
            "Export completed"
        );

        for report in self.aborted() {
            tracing::warn!(
                category = %report.category,
                reason = report.abort_reason().unwrap_or_default(),
                "Category aborted"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExportOutcome;

    fn tally(written: u64, failed: u64) -> CategoryTally {
        let mut tally = CategoryTally::new();
        for _ in 0..written {
            tally.record(&ExportOutcome::Written {
                path: PathBuf::from("x"),
                bytes: 1,
            });
        }
        for _ in 0..failed {
            tally.record(&ExportOutcome::SkippedNoData);
        }
        tally
    }

    #[test]
    fn test_empty_summary_is_successful() {
        let summary = RunSummary::new(PathBuf::from("out"), false);
        assert!(summary.is_successful());
        assert_eq!(summary.totals(), CategoryTally::new());
    }

    #[test]
    fn test_totals_across_categories() {
        let mut summary = RunSummary::new(PathBuf::from("out"), false);
        summary.add_report(CategoryReport::completed(Category::Risk, tally(3, 1)));
        summary.add_report(CategoryReport::completed(Category::Policy, tally(2, 0)));

        let totals = summary.totals();
        assert_eq!(totals.total, 6);
        assert_eq!(totals.succeeded, 5);
        assert_eq!(totals.failed, 1);
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_aborted_category_fails_run() {
        let mut summary = RunSummary::new(PathBuf::from("out"), false);
        summary.add_report(CategoryReport::completed(Category::Risk, tally(1, 0)));
        summary.add_report(CategoryReport::aborted(
            Category::Incident,
            CategoryTally::new(),
            "query failed",
        ));

        assert!(!summary.is_successful());
        let aborted: Vec<_> = summary.aborted().collect();
        assert_eq!(aborted.len(), 1);
        assert_eq!(aborted[0].abort_reason(), Some("query failed"));
        assert_eq!(
            summary.report(Category::Risk).map(|r| r.tally.succeeded),
            Some(1)
        );
    }

    #[test]
    fn test_with_duration() {
        let summary =
            RunSummary::new(PathBuf::from("out"), true).with_duration(Duration::from_secs(9));
        assert_eq!(summary.duration.as_secs(), 9);
        assert!(summary.dry_run);
        summary.log_summary();
    }
}
