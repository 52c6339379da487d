//! Export command implementation
//!
//! This module implements the `export` command for writing the stored
//! documents of the selected categories into the output folder tree.

use crate::config::{redact_connection_string, HarvestConfig};
use crate::core::export::events::format_size;
use crate::core::export::{RunCoordinator, RunSummary};
use crate::domain::{HarvestError, Result};
use clap::Args;
use std::fmt::Write as _;
use std::path::Path;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - plan every document without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Override the output base directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<String>,

    /// Override the categories to export (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "CATEGORY")]
    pub category: Vec<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, loaded: Result<HarvestConfig>) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match loaded {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let coordinator = match RunCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create run coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(2);
            }
        };

        let dry_run = config.application.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        if !self.yes && !dry_run && !confirm(&config, &coordinator)? {
            println!("Export cancelled.");
            return Ok(0);
        }

        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.execute().await {
            Ok(s) => s,
            Err(HarvestError::Source(e)) => {
                tracing::error!(error = %e, "Cannot reach data source");
                eprintln!("Cannot reach data source: {e}");
                return Ok(4);
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        print!("{}", render_summary(&summary));

        Ok(exit_code(&summary))
    }

    fn apply_overrides(&self, config: &mut HarvestConfig) {
        if let Some(output) = &self.output {
            tracing::info!(output = %output, "Overriding output directory from CLI");
            config.output.base_directory = output.clone();
        }

        if !self.category.is_empty() {
            let categories: Vec<String> = self
                .category
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            tracing::info!(categories = ?categories, "Overriding categories from CLI");
            config.output.categories = categories;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }
}

fn confirm(config: &HarvestConfig, coordinator: &RunCoordinator) -> anyhow::Result<bool> {
    use std::io::{self, Write};

    println!("Export Configuration:");
    println!(
        "  Source: {}",
        redact_connection_string(&config.source.connection_string)
    );
    println!("  Output: {}", coordinator.base_directory().display());
    println!(
        "  Categories: {}",
        coordinator
            .categories()
            .iter()
            .map(|c| c.key())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();
    print!("Proceed with export? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Exit code for a finished run: 0 when every row was written, 1 otherwise
pub fn exit_code(summary: &RunSummary) -> i32 {
    if summary.is_successful() {
        0
    } else {
        1
    }
}

/// Text printed after the run
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let totals = summary.totals();

    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Export Summary:");
    for report in &summary.reports {
        let _ = writeln!(
            out,
            "  {} - Total: {}, Success: {}, Failed: {}",
            report.category.display_name(),
            report.tally.total,
            report.tally.succeeded,
            report.tally.failed
        );
    }

    let mut aborted = summary.aborted().peekable();
    if aborted.peek().is_some() {
        let _ = writeln!(out);
        let _ = writeln!(out, "⚠️  Categories stopped early:");
        for report in aborted {
            let _ = writeln!(
                out,
                "  - {}: {}",
                report.category.display_name(),
                report.abort_reason().unwrap_or_default()
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Grand Total - Total: {}, Success: {}, Failed: {}",
        totals.total, totals.succeeded, totals.failed
    );
    if totals.failed > 0 {
        let _ = writeln!(
            out,
            "    No data: {}, Missing metadata: {}, Errors: {}",
            totals.skipped_no_data, totals.skipped_missing_metadata, totals.errors
        );
    }
    let _ = writeln!(out, "  Written: {}", format_size(totals.bytes_written));
    let _ = writeln!(out, "  Duration: {:.2}s", summary.duration.as_secs_f64());
    let _ = writeln!(
        out,
        "  Output folder: {}",
        display_folder(&summary.base_directory)
    );
    if summary.dry_run {
        let _ = writeln!(out, "  (dry run - nothing was written)");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "✅ All downloads complete!");
    out
}

fn display_folder(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
