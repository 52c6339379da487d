//! Generic category exporter
//!
//! Turns a stream of rows into files below one category root. All category
//! differences live in [`descriptor::plan`](super::descriptor::plan); the
//! loop here is shared.

use super::descriptor::{self, DocumentPlan};
use super::events::{EventSink, ExportEvent};
use super::summary::CategoryReport;
use crate::adapters::filesystem::DocumentSink;
use crate::adapters::source::RowStream;
use crate::core::naming::{
    resolve_extension, sanitize_file_name, sanitize_folder_name, UniquePathAllocator,
};
use crate::domain::{Category, CategoryTally, ExportOutcome, SourceRow};
use futures::StreamExt;
use std::path::{Path, PathBuf};

/// Exports the rows of one category
pub struct CategoryExporter<'a> {
    category: Category,
    root: PathBuf,
    sink: &'a dyn DocumentSink,
    events: &'a dyn EventSink,
    allocator: &'a mut UniquePathAllocator,
}

impl<'a> CategoryExporter<'a> {
    /// Create an exporter writing below `root`
    ///
    /// The allocator is shared across categories so that paths stay unique
    /// for the whole run.
    pub fn new(
        category: Category,
        root: PathBuf,
        sink: &'a dyn DocumentSink,
        events: &'a dyn EventSink,
        allocator: &'a mut UniquePathAllocator,
    ) -> Self {
        Self {
            category,
            root,
            sink,
            events,
            allocator,
        }
    }

    /// Consume `rows` one at a time
    ///
    /// A row-level source error fails that row only. Any other source error
    /// aborts the category; rows already processed keep their outcome.
    pub async fn export(&mut self, mut rows: RowStream) -> CategoryReport {
        let mut tally = CategoryTally::new();
        let mut current_group: Option<String> = None;
        let mut row_index: u64 = 0;
        let mut abort_reason: Option<String> = None;

        while let Some(item) = rows.next().await {
            match item {
                Ok(row) => {
                    row_index += 1;
                    let plan = descriptor::plan(&row, row_index);

                    if current_group.as_deref() != Some(plan.group.as_str()) {
                        self.events.emit(&ExportEvent::GroupChanged {
                            category: self.category,
                            group: plan.group.clone(),
                        });
                        current_group = Some(plan.group.clone());
                    }

                    let outcome = self.export_row(&row, &plan).await;
                    self.finish_row(&mut tally, row_index, row.record_label(row_index), outcome);
                }
                Err(err) if err.is_row_level() => {
                    row_index += 1;
                    self.finish_row(
                        &mut tally,
                        row_index,
                        format!("Row {row_index}"),
                        ExportOutcome::Failed(err.to_string()),
                    );
                }
                Err(err) => {
                    let reason = err.to_string();
                    self.events.emit(&ExportEvent::CategoryAborted {
                        category: self.category,
                        reason: reason.clone(),
                    });
                    abort_reason = Some(reason);
                    break;
                }
            }
        }

        self.events.emit(&ExportEvent::CategoryFinished {
            category: self.category,
            tally: tally.clone(),
        });

        match abort_reason {
            Some(reason) => CategoryReport::aborted(self.category, tally, reason),
            None => CategoryReport::completed(self.category, tally),
        }
    }

    fn finish_row(
        &self,
        tally: &mut CategoryTally,
        row_index: u64,
        record: String,
        outcome: ExportOutcome,
    ) {
        tally.record(&outcome);
        self.events.emit(&ExportEvent::RowFinished {
            category: self.category,
            row_index,
            record,
            outcome,
        });
    }

    async fn export_row(&mut self, row: &SourceRow, plan: &DocumentPlan) -> ExportOutcome {
        let payload = match row.payload() {
            Some(data) if !data.is_empty() => data,
            _ => return ExportOutcome::SkippedNoData,
        };

        if plan.missing_metadata {
            return ExportOutcome::SkippedMissingMetadata;
        }

        let folder = folder_path(&self.root, &plan.folders);
        if let Err(e) = self.sink.ensure_dir(&folder).await {
            return ExportOutcome::Failed(e.to_string());
        }

        let file_name = sanitize_file_name(&file_name(plan, payload, self.category));
        let path = match self
            .allocator
            .allocate(self.sink, &folder.join(file_name))
            .await
        {
            Ok(path) => path,
            Err(e) => return ExportOutcome::Failed(e.to_string()),
        };

        match self.sink.write_atomic(&path, payload).await {
            Ok(bytes) => ExportOutcome::Written { path, bytes },
            Err(e) => ExportOutcome::Failed(e.to_string()),
        }
    }
}

/// `root` joined with each sanitized folder segment
pub fn folder_path(root: &Path, segments: &[String]) -> PathBuf {
    segments
        .iter()
        .fold(root.to_path_buf(), |dir, segment| {
            dir.join(sanitize_folder_name(segment))
        })
}

/// Unsanitized file name: prefix, base name and inferred extension
pub fn file_name(plan: &DocumentPlan, payload: &[u8], category: Category) -> String {
    let base = plan.base_name();
    let extension = resolve_extension(
        Some(&base),
        plan.declared_path.as_deref(),
        plan.content_type.as_deref(),
        payload,
        category.default_extension(),
    );

    format!(
        "{}{}{}",
        plan.name_prefix.as_deref().unwrap_or_default(),
        base,
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::filesystem::LocalFileSink;
    use crate::domain::{
        Attachment, AuditRecommendationRow, DetailDocumentRow, IncidentDocumentRow, SourceError,
    };
    use futures::stream;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingEvents(Mutex<Vec<ExportEvent>>);

    impl EventSink for RecordingEvents {
        fn emit(&self, event: &ExportEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    impl RecordingEvents {
        fn outcomes(&self) -> Vec<ExportOutcome> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    ExportEvent::RowFinished { outcome, .. } => Some(outcome.clone()),
                    _ => None,
                })
                .collect()
        }

        fn groups(&self) -> Vec<String> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    ExportEvent::GroupChanged { group, .. } => Some(group.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    fn control(id: i32, title: &str, file_name: Option<&str>, data: &[u8]) -> SourceRow {
        SourceRow::Control(DetailDocumentRow {
            detail_id: id,
            title: Some(title.to_string()),
            file_name: file_name.map(str::to_string),
            file_data: Some(data.to_vec()),
        })
    }

    fn rows(items: Vec<Result<SourceRow, SourceError>>) -> RowStream {
        stream::iter(items).boxed()
    }

    #[tokio::test]
    async fn test_writes_documents_into_folders() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Control");
        let sink = LocalFileSink::new();
        let events = RecordingEvents::default();
        let mut allocator = UniquePathAllocator::new();

        let mut exporter =
            CategoryExporter::new(Category::Control, root.clone(), &sink, &events, &mut allocator);
        let report = exporter
            .export(rows(vec![Ok(control(4, "Access", Some("matrix.xlsx"), b"PK\x03\x04"))]))
            .await;

        let expected = root.join("Control_4_Access").join("matrix.xlsx");
        assert_eq!(std::fs::read(&expected).unwrap(), b"PK\x03\x04");
        assert_eq!(report.tally.succeeded, 1);
        assert_eq!(report.abort_reason(), None);
    }

    #[tokio::test]
    async fn test_same_name_with_and_without_payload() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Control");
        let sink = LocalFileSink::new();
        let events = RecordingEvents::default();
        let mut allocator = UniquePathAllocator::new();

        let mut exporter =
            CategoryExporter::new(Category::Control, root.clone(), &sink, &events, &mut allocator);
        let report = exporter
            .export(rows(vec![
                Ok(control(4, "Access", Some("memo.docx"), b"data")),
                Ok(control(4, "Access", Some("memo.docx"), b"")),
            ]))
            .await;

        assert_eq!(report.tally.total, 2);
        assert_eq!(report.tally.succeeded, 1);
        assert_eq!(report.tally.skipped_no_data, 1);
        let files: Vec<_> = std::fs::read_dir(root.join("Control_4_Access"))
            .unwrap()
            .collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_names_get_suffixes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Control");
        let sink = LocalFileSink::new();
        let events = RecordingEvents::default();
        let mut allocator = UniquePathAllocator::new();

        let mut exporter =
            CategoryExporter::new(Category::Control, root.clone(), &sink, &events, &mut allocator);
        exporter
            .export(rows(vec![
                Ok(control(1, "A", Some("memo.docx"), b"one")),
                Ok(control(1, "A", Some("memo.docx"), b"two")),
            ]))
            .await;

        let folder = root.join("Control_1_A");
        assert_eq!(std::fs::read(folder.join("memo.docx")).unwrap(), b"one");
        assert_eq!(std::fs::read(folder.join("memo_1.docx")).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_fallback_name_with_content_type_extension() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Audit_Recommendations");
        let sink = LocalFileSink::new();
        let events = RecordingEvents::default();
        let mut allocator = UniquePathAllocator::new();
        let id = uuid::Uuid::new_v4();

        let row = SourceRow::AuditRecommendation(AuditRecommendationRow {
            recommendation_no: Some("3".to_string()),
            recommendation_title: Some("Backups".to_string()),
            attachment: Attachment {
                attachment_id: id,
                title: Some(" ".to_string()),
                document_url: None,
                content_type: Some(
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                        .to_string(),
                ),
                file_data: Some(b"not a zip".to_vec()),
            },
        });

        let mut exporter = CategoryExporter::new(
            Category::AuditRecommendation,
            root.clone(),
            &sink,
            &events,
            &mut allocator,
        );
        exporter.export(rows(vec![Ok(row)])).await;

        let expected = root
            .join("Recommendation_3_Backups")
            .join(format!("attachment_{id}.docx"));
        assert!(expected.is_file());
    }

    #[tokio::test]
    async fn test_incident_prefix_and_sniffed_extension() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Incident");
        let sink = LocalFileSink::new();
        let events = RecordingEvents::default();
        let mut allocator = UniquePathAllocator::new();

        let row = SourceRow::Incident(IncidentDocumentRow {
            incident_code: Some("INC/7".to_string()),
            incident_title: Some("Flood".to_string()),
            name: None,
            file_path: None,
            file_data: Some(b"%PDF-1.5".to_vec()),
        });

        let mut exporter =
            CategoryExporter::new(Category::Incident, root.clone(), &sink, &events, &mut allocator);
        exporter.export(rows(vec![Ok(row)])).await;

        assert!(root.join("INC_7").join("INC_7_Document_1.pdf").is_file());
    }

    #[tokio::test]
    async fn test_decode_error_fails_row_and_continues() {
        let temp = TempDir::new().unwrap();
        let sink = LocalFileSink::new();
        let events = RecordingEvents::default();
        let mut allocator = UniquePathAllocator::new();

        let mut exporter = CategoryExporter::new(
            Category::Control,
            temp.path().to_path_buf(),
            &sink,
            &events,
            &mut allocator,
        );
        let report = exporter
            .export(rows(vec![
                Err(SourceError::DecodeFailed {
                    column: "detail_id".to_string(),
                    message: "unexpected null".to_string(),
                }),
                Ok(control(2, "B", None, b"data")),
            ]))
            .await;

        assert_eq!(report.tally.total, 2);
        assert_eq!(report.tally.errors, 1);
        assert_eq!(report.tally.succeeded, 1);
        assert_eq!(report.abort_reason(), None);
    }

    #[tokio::test]
    async fn test_fetch_error_aborts_category_keeping_tally() {
        let temp = TempDir::new().unwrap();
        let sink = LocalFileSink::new();
        let events = RecordingEvents::default();
        let mut allocator = UniquePathAllocator::new();

        let mut exporter = CategoryExporter::new(
            Category::Control,
            temp.path().to_path_buf(),
            &sink,
            &events,
            &mut allocator,
        );
        let report = exporter
            .export(rows(vec![
                Ok(control(1, "A", None, b"data")),
                Err(SourceError::FetchFailed("connection reset".to_string())),
                Ok(control(2, "B", None, b"never")),
            ]))
            .await;

        assert_eq!(report.tally.total, 1);
        assert_eq!(report.tally.succeeded, 1);
        assert!(report.abort_reason().unwrap().contains("connection reset"));
        assert_eq!(events.outcomes().len(), 1);
    }

    #[tokio::test]
    async fn test_group_changes_announced_once_per_group() {
        let temp = TempDir::new().unwrap();
        let sink = LocalFileSink::new();
        let events = RecordingEvents::default();
        let mut allocator = UniquePathAllocator::new();

        let mut exporter = CategoryExporter::new(
            Category::Control,
            temp.path().to_path_buf(),
            &sink,
            &events,
            &mut allocator,
        );
        exporter
            .export(rows(vec![
                Ok(control(1, "A", None, b"1")),
                Ok(control(1, "A", None, b"2")),
                Ok(control(2, "B", None, b"3")),
            ]))
            .await;

        assert_eq!(events.groups(), vec!["Control ID 1 - A", "Control ID 2 - B"]);
        assert_eq!(events.outcomes().len(), 3);
    }

    #[test]
    fn test_file_name_keeps_explicit_extension() {
        let row = control(1, "A", Some("scan.tiff"), b"%PDF");
        let plan = descriptor::plan(&row, 1);
        assert_eq!(file_name(&plan, b"%PDF", Category::Control), "scan.tiff");
    }

    #[test]
    fn test_folder_path_sanitizes_segments() {
        let path = folder_path(
            Path::new("/out"),
            &["A/B".to_string(), "  ".to_string()],
        );
        assert_eq!(path, PathBuf::from("/out/A_B/Unknown"));
    }
}
