//! Domain models and types for DocHarvest.
//!
//! The domain layer provides:
//! - **Categories** ([`Category`]): the nine document sources and their fixed run order
//! - **Source rows** ([`SourceRow`]): one projection per category of a fetched database row
//! - **Outcomes** ([`ExportOutcome`], [`CategoryTally`]): what happened to each row
//! - **Error types** ([`HarvestError`], [`SourceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Run-level operations return [`Result<T, HarvestError>`]. Problems with a
//! single row never surface as errors; they become an [`ExportOutcome`]:
//!
//! ```rust
//! use docharvest::domain::{CategoryTally, ExportOutcome};
//!
//! let mut tally = CategoryTally::new();
//! tally.record(&ExportOutcome::SkippedNoData);
//! assert_eq!(tally.failed, 1);
//! ```

pub mod category;
pub mod errors;
pub mod outcome;
pub mod result;
pub mod row;

// Re-export commonly used types for convenience
pub use category::{parse_category_list, Category};
pub use errors::{HarvestError, SourceError};
pub use outcome::{CategoryTally, ExportOutcome};
pub use result::Result;
pub use row::{
    Attachment, AuditDetailRow, AuditFindingRow, AuditRecommendationRow, ComplianceDocumentRow,
    DetailDocumentRow, IncidentDocumentRow, PolicyDocumentRow, RiskDocumentRow, SourceRow,
};
