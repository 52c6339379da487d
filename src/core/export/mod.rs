//! Document export
//!
//! This module provides the core export logic for DocHarvest:
//! - Per-category document plans ([`descriptor`])
//! - The generic category exporter ([`exporter`])
//! - Structured progress events ([`events`])
//! - Run coordination ([`coordinator`]) and reporting ([`summary`])

pub mod coordinator;
pub mod descriptor;
pub mod events;
pub mod exporter;
pub mod summary;

pub use coordinator::RunCoordinator;
pub use descriptor::{plan, DocumentPlan, NameCandidate};
pub use events::{EventSink, ExportEvent, TracingEventSink};
pub use exporter::CategoryExporter;
pub use summary::{CategoryReport, CategoryStatus, RunSummary};
