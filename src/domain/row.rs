//! Source rows
//!
//! One projection per category of the columns the exporter needs. Text
//! columns that may be NULL are `Option<String>`; the payload is
//! `Option<Vec<u8>>` because every blob column is nullable.

use super::category::Category;
use uuid::Uuid;

/// Risk assessment document joined with its assessment detail and risk type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskDocumentRow {
    pub assessment_document_id: i32,
    pub field_name: Option<String>,
    pub risk_code: Option<String>,
    pub risk_title: Option<String>,
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub file_data: Option<Vec<u8>>,
}

/// Entity document attached to an incident
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentDocumentRow {
    pub incident_code: Option<String>,
    pub incident_title: Option<String>,
    pub name: Option<String>,
    pub file_path: Option<String>,
    pub file_data: Option<Vec<u8>>,
}

/// Control or action document keyed by its detail id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailDocumentRow {
    pub detail_id: i32,
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub file_data: Option<Vec<u8>>,
}

/// Entity document resolved to an application and entity folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplianceDocumentRow {
    pub application_folder: Option<String>,
    pub entity_folder: Option<String>,
    pub file_path: Option<String>,
    pub file_data: Option<Vec<u8>>,
}

/// Columns shared by every row of the generic attachment table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    pub attachment_id: Uuid,
    pub title: Option<String>,
    pub document_url: Option<String>,
    pub content_type: Option<String>,
    pub file_data: Option<Vec<u8>>,
}

/// Attachment of an audit recommendation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditRecommendationRow {
    pub recommendation_no: Option<String>,
    pub recommendation_title: Option<String>,
    pub attachment: Attachment,
}

/// Attachment of an audit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditDetailRow {
    pub audit_no: Option<String>,
    pub audit_title: Option<String>,
    pub attachment: Attachment,
}

/// Attachment of an audit finding, with its parent audit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFindingRow {
    pub audit_no: Option<String>,
    pub audit_title: Option<String>,
    pub finding_no: Option<String>,
    pub attachment: Attachment,
}

/// Entity document attached to a policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyDocumentRow {
    pub policy_id: i32,
    pub code: Option<String>,
    pub title: Option<String>,
    pub document_id: i32,
    pub document_name: Option<String>,
    pub file_path: Option<String>,
    pub file_data: Option<Vec<u8>>,
}

/// A fetched row of any category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRow {
    Risk(RiskDocumentRow),
    Incident(IncidentDocumentRow),
    Control(DetailDocumentRow),
    Action(DetailDocumentRow),
    Compliance(ComplianceDocumentRow),
    AuditRecommendation(AuditRecommendationRow),
    AuditDetail(AuditDetailRow),
    AuditFinding(AuditFindingRow),
    Policy(PolicyDocumentRow),
}

impl SourceRow {
    /// Category the row was fetched for
    pub fn category(&self) -> Category {
        match self {
            SourceRow::Risk(_) => Category::Risk,
            SourceRow::Incident(_) => Category::Incident,
            SourceRow::Control(_) => Category::Control,
            SourceRow::Action(_) => Category::Action,
            SourceRow::Compliance(_) => Category::Compliance,
            SourceRow::AuditRecommendation(_) => Category::AuditRecommendation,
            SourceRow::AuditDetail(_) => Category::AuditDetail,
            SourceRow::AuditFinding(_) => Category::AuditFinding,
            SourceRow::Policy(_) => Category::Policy,
        }
    }

    /// Document bytes, if the blob column was non-NULL
    pub fn payload(&self) -> Option<&[u8]> {
        let data = match self {
            SourceRow::Risk(r) => &r.file_data,
            SourceRow::Incident(r) => &r.file_data,
            SourceRow::Control(r) | SourceRow::Action(r) => &r.file_data,
            SourceRow::Compliance(r) => &r.file_data,
            SourceRow::AuditRecommendation(r) => &r.attachment.file_data,
            SourceRow::AuditDetail(r) => &r.attachment.file_data,
            SourceRow::AuditFinding(r) => &r.attachment.file_data,
            SourceRow::Policy(r) => &r.file_data,
        };
        data.as_deref()
    }

    /// Short label identifying the record in log lines
    ///
    /// Rows without a stable id (incident and compliance documents) are
    /// identified by their position in the category.
    pub fn record_label(&self, row_index: u64) -> String {
        match self {
            SourceRow::Risk(r) => format!("Document ID {}", r.assessment_document_id),
            SourceRow::Control(r) => format!("Control ID {}", r.detail_id),
            SourceRow::Action(r) => format!("Action ID {}", r.detail_id),
            SourceRow::AuditRecommendation(AuditRecommendationRow { attachment, .. })
            | SourceRow::AuditDetail(AuditDetailRow { attachment, .. })
            | SourceRow::AuditFinding(AuditFindingRow { attachment, .. }) => {
                format!("Attachment ID {}", attachment.attachment_id)
            }
            SourceRow::Policy(r) => format!("Document ID {}", r.document_id),
            SourceRow::Incident(_) | SourceRow::Compliance(_) => format!("Row {row_index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_matches_variant() {
        let row = SourceRow::Action(DetailDocumentRow::default());
        assert_eq!(row.category(), Category::Action);

        let row = SourceRow::AuditFinding(AuditFindingRow::default());
        assert_eq!(row.category(), Category::AuditFinding);
    }

    #[test]
    fn test_payload_absent_and_present() {
        let row = SourceRow::Policy(PolicyDocumentRow::default());
        assert!(row.payload().is_none());

        let row = SourceRow::Policy(PolicyDocumentRow {
            file_data: Some(vec![1, 2, 3]),
            ..Default::default()
        });
        assert_eq!(row.payload(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_attachment_payload() {
        let row = SourceRow::AuditDetail(AuditDetailRow {
            attachment: Attachment {
                file_data: Some(b"%PDF".to_vec()),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(row.payload(), Some(&b"%PDF"[..]));
    }

    #[test]
    fn test_record_labels() {
        let row = SourceRow::Risk(RiskDocumentRow {
            assessment_document_id: 17,
            ..Default::default()
        });
        assert_eq!(row.record_label(3), "Document ID 17");

        let row = SourceRow::Compliance(ComplianceDocumentRow::default());
        assert_eq!(row.record_label(3), "Row 3");

        let id = Uuid::nil();
        let row = SourceRow::AuditRecommendation(AuditRecommendationRow {
            attachment: Attachment {
                attachment_id: id,
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(row.record_label(1), format!("Attachment ID {id}"));
    }
}
