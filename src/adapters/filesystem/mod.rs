//! Document sink
//!
//! The exporter never touches the filesystem directly; it goes through a
//! [`DocumentSink`]. [`LocalFileSink`] is the only production implementation.

use crate::domain::{HarvestError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Destination for exported documents
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Create `dir` and all its parents. Succeeds if it already exists.
    async fn ensure_dir(&self, dir: &Path) -> Result<()>;

    /// Whether something already exists at `path`
    async fn exists(&self, path: &Path) -> bool;

    /// Write `data` to `path` so that no partial file is ever visible there
    ///
    /// Returns the number of bytes written.
    async fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<u64>;
}

/// Writes documents to the local filesystem
#[derive(Debug, Clone, Default)]
pub struct LocalFileSink {
    dry_run: bool,
}

impl LocalFileSink {
    /// Create a sink that writes to disk
    pub fn new() -> Self {
        Self { dry_run: false }
    }

    /// Create a sink that only logs what it would write
    ///
    /// [`exists`](DocumentSink::exists) still consults the disk so planned
    /// names match those of a real run.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Whether the sink is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

#[async_trait]
impl DocumentSink for LocalFileSink {
    async fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if self.dry_run {
            tracing::debug!(path = %dir.display(), "Dry run: would create directory");
            return Ok(());
        }

        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            HarvestError::Io(format!(
                "Failed to create directory {}: {}",
                dir.display(),
                e
            ))
        })
    }

    async fn exists(&self, path: &Path) -> bool {
        // An unanswerable check counts as taken so the allocator moves on
        tokio::fs::try_exists(path).await.unwrap_or(true)
    }

    async fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<u64> {
        if self.dry_run {
            tracing::debug!(
                path = %path.display(),
                bytes = data.len(),
                "Dry run: would write document"
            );
            return Ok(data.len() as u64);
        }

        let parent = path.parent().ok_or_else(|| {
            HarvestError::Output(format!("No parent directory for {}", path.display()))
        })?;
        let staging = parent.join(format!(".{}.part", uuid::Uuid::new_v4()));

        if let Err(e) = tokio::fs::write(&staging, data).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(HarvestError::Io(format!(
                "Failed to write {}: {}",
                path.display(),
                e
            )));
        }

        if let Err(e) = tokio::fs::rename(&staging, path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(HarvestError::Io(format!(
                "Failed to move document into place at {}: {}",
                path.display(),
                e
            )));
        }

        Ok(data.len() as u64)
    }
}
