//! Run coordinator - main orchestrator for the export process
//!
//! Runs the selected categories one after another against a single base
//! directory and collects their reports. Only an unreachable row source or
//! an uncreatable base directory stops the run; everything else is
//! contained in the category or row where it happened.

use super::events::{EventSink, ExportEvent, TracingEventSink};
use super::exporter::CategoryExporter;
use super::summary::{CategoryReport, RunSummary};
use crate::adapters::filesystem::{DocumentSink, LocalFileSink};
use crate::adapters::postgresql::PostgresRowSource;
use crate::adapters::source::RowSource;
use crate::config::HarvestConfig;
use crate::core::naming::UniquePathAllocator;
use crate::domain::{Category, CategoryTally, HarvestError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Run coordinator
pub struct RunCoordinator {
    source: Arc<dyn RowSource>,
    sink: Arc<dyn DocumentSink>,
    events: Arc<dyn EventSink>,
    base_directory: PathBuf,
    categories: Vec<Category>,
    dry_run: bool,
}

impl RunCoordinator {
    /// Create a coordinator from its collaborators
    ///
    /// `categories` are run in the fixed category order regardless of the
    /// order they are given in.
    pub fn new(
        source: Arc<dyn RowSource>,
        sink: Arc<dyn DocumentSink>,
        events: Arc<dyn EventSink>,
        base_directory: impl Into<PathBuf>,
        categories: &[Category],
    ) -> Self {
        Self {
            source,
            sink,
            events,
            base_directory: base_directory.into(),
            categories: Category::ALL
                .into_iter()
                .filter(|c| categories.contains(c))
                .collect(),
            dry_run: false,
        }
    }

    /// Mark the run as a dry run in its summary
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Build a coordinator wired to PostgreSQL and the local filesystem
    ///
    /// # Errors
    ///
    /// Returns an error if the category list is invalid or the connection
    /// pool cannot be built.
    pub fn from_config(config: &HarvestConfig) -> Result<Self> {
        let categories = config.output.selected_categories()?;
        let source = PostgresRowSource::new(&config.source)?;
        let sink = if config.application.dry_run {
            LocalFileSink::dry_run()
        } else {
            LocalFileSink::new()
        };

        Ok(Self::new(
            Arc::new(source),
            Arc::new(sink),
            Arc::new(TracingEventSink::new()),
            &config.output.base_directory,
            &categories,
        )
        .with_dry_run(config.application.dry_run))
    }

    /// Base directory of the run
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Categories that will run, in run order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Execute the export
    ///
    /// # Errors
    ///
    /// Returns an error, before any category runs, if the row source cannot
    /// be reached or the base directory cannot be created. Category and row
    /// failures are reported in the summary instead.
    pub async fn execute(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new(self.base_directory.clone(), self.dry_run);

        tracing::info!(
            base_directory = %self.base_directory.display(),
            categories = self.categories.len(),
            dry_run = self.dry_run,
            "Starting export process"
        );

        self.source.test_connection().await?;
        tracing::info!("Connected to data source");

        self.sink
            .ensure_dir(&self.base_directory)
            .await
            .map_err(|e| {
                HarvestError::Output(format!(
                    "Cannot create base directory {}: {}",
                    self.base_directory.display(),
                    e
                ))
            })?;

        let mut allocator = UniquePathAllocator::new();
        for &category in &self.categories {
            let report = self.run_category(category, &mut allocator).await;
            summary.add_report(report);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn run_category(
        &self,
        category: Category,
        allocator: &mut UniquePathAllocator,
    ) -> CategoryReport {
        self.events.emit(&ExportEvent::CategoryStarted { category });

        let root = match category.root_folder() {
            Some(folder) => self.base_directory.join(folder),
            None => self.base_directory.clone(),
        };

        if let Err(e) = self.sink.ensure_dir(&root).await {
            return self.abort(category, format!("Cannot create {}: {}", root.display(), e));
        }

        let rows = match self.source.open(category).await {
            Ok(rows) => rows,
            Err(e) => return self.abort(category, e.to_string()),
        };

        CategoryExporter::new(
            category,
            root,
            self.sink.as_ref(),
            self.events.as_ref(),
            allocator,
        )
        .export(rows)
        .await
    }

    fn abort(&self, category: Category, reason: String) -> CategoryReport {
        let tally = CategoryTally::new();
        self.events.emit(&ExportEvent::CategoryAborted {
            category,
            reason: reason.clone(),
        });
        self.events.emit(&ExportEvent::CategoryFinished {
            category,
            tally: tally.clone(),
        });
        CategoryReport::aborted(category, tally, reason)
    }
}
