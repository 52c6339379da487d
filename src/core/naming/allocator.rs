//! Collision-free output paths
//!
//! A document is never written over an existing file or over a path handed
//! out earlier in the same run. Colliding names get a numeric suffix before
//! the extension: `report.pdf`, `report_1.pdf`, `report_2.pdf`, ...

use crate::adapters::filesystem::DocumentSink;
use crate::domain::{HarvestError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Highest numeric suffix tried before a name is given up on.
pub const MAX_SUFFIX: u64 = 10_000;

/// Hands out paths that do not collide with existing files
///
/// Not safe for concurrent use: the check and the later write are separate
/// steps.
#[derive(Debug, Default)]
pub struct UniquePathAllocator {
    reserved: HashSet<PathBuf>,
}

impl UniquePathAllocator {
    /// Create an allocator with nothing reserved
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of paths handed out so far
    pub fn allocated(&self) -> usize {
        self.reserved.len()
    }

    /// Return `desired`, or the first free suffixed variant of it
    ///
    /// The returned path is reserved for the rest of the run. Fails when
    /// every suffix up to [`MAX_SUFFIX`] is taken.
    pub async fn allocate(
        &mut self,
        sink: &dyn DocumentSink,
        desired: &Path,
    ) -> Result<PathBuf> {
        let mut candidate = desired.to_path_buf();
        let mut counter: u64 = 1;

        while self.is_taken(sink, &candidate).await {
            if counter > MAX_SUFFIX {
                return Err(HarvestError::Output(format!(
                    "No free file name for {} after {} attempts",
                    desired.display(),
                    MAX_SUFFIX
                )));
            }
            candidate = suffixed(desired, counter);
            counter += 1;
        }

        self.reserved.insert(candidate.clone());
        Ok(candidate)
    }

    async fn is_taken(&self, sink: &dyn DocumentSink, path: &Path) -> bool {
        self.reserved.contains(path) || sink.exists(path).await
    }
}

/// `dir/stem_{n}.ext`, splitting stem and extension at the last dot
fn suffixed(path: &Path, n: u64) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    let new_name = match file_name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}_{}{}", &file_name[..dot], n, &file_name[dot..]),
        _ => format!("{file_name}_{n}"),
    };

    path.with_file_name(new_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::filesystem::LocalFileSink;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_allocate_free_path_unchanged() {
        let temp = TempDir::new().unwrap();
        let sink = LocalFileSink::new();
        let mut allocator = UniquePathAllocator::new();
        let desired = temp.path().join("report.pdf");

        assert_eq!(allocator.allocate(&sink, &desired).await.unwrap(), desired);
        assert_eq!(allocator.allocated(), 1);
    }

    #[tokio::test]
    async fn test_allocate_after_materialized_gets_suffix() {
        let temp = TempDir::new().unwrap();
        let sink = LocalFileSink::new();
        let mut allocator = UniquePathAllocator::new();
        let desired = temp.path().join("name.ext");

        let first = allocator.allocate(&sink, &desired).await.unwrap();
        std::fs::write(&first, b"one").unwrap();
        let second = allocator.allocate(&sink, &desired).await.unwrap();

        assert_eq!(first, temp.path().join("name.ext"));
        assert_eq!(second, temp.path().join("name_1.ext"));
    }

    #[tokio::test]
    async fn test_allocate_avoids_reserved_without_disk_write() {
        let temp = TempDir::new().unwrap();
        let sink = LocalFileSink::dry_run();
        let mut allocator = UniquePathAllocator::new();
        let desired = temp.path().join("memo.docx");

        let a = allocator.allocate(&sink, &desired).await.unwrap();
        let b = allocator.allocate(&sink, &desired).await.unwrap();
        let c = allocator.allocate(&sink, &desired).await.unwrap();

        assert_eq!(a, temp.path().join("memo.docx"));
        assert_eq!(b, temp.path().join("memo_1.docx"));
        assert_eq!(c, temp.path().join("memo_2.docx"));
    }

    #[tokio::test]
    async fn test_allocate_skips_existing_suffixes() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.txt"), b"").unwrap();
        std::fs::write(temp.path().join("a_1.txt"), b"").unwrap();
        let sink = LocalFileSink::new();
        let mut allocator = UniquePathAllocator::new();

        let got = allocator
            .allocate(&sink, &temp.path().join("a.txt"))
            .await
            .unwrap();
        assert_eq!(got, temp.path().join("a_2.txt"));
    }

    #[tokio::test]
    async fn test_allocate_gives_up_when_no_check_can_succeed() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let sink = LocalFileSink::dry_run();
        let mut allocator = UniquePathAllocator::new();

        let result = allocator.allocate(&sink, &blocker.join("doc.pdf")).await;

        assert!(matches!(result, Err(HarvestError::Output(_))));
        assert_eq!(allocator.allocated(), 0);
    }

    #[test]
    fn test_suffixed_splits_at_last_dot() {
        let p = Path::new("/out/archive.tar.gz");
        assert_eq!(suffixed(p, 3), PathBuf::from("/out/archive.tar_3.gz"));
    }

    #[test]
    fn test_suffixed_without_extension() {
        let p = Path::new("/out/README");
        assert_eq!(suffixed(p, 1), PathBuf::from("/out/README_1"));
        let p = Path::new("/out/.hidden");
        assert_eq!(suffixed(p, 1), PathBuf::from("/out/.hidden_1"));
    }
}
