//! Per-category document plans
//!
//! A [`DocumentPlan`] captures everything category-specific about where a
//! row's document goes: folder segments below the category root, the
//! ordered name candidates, a synthesized fallback name, an optional name
//! prefix and the hints the extension resolver needs. The exporter itself
//! is the same for every category.

use crate::domain::{
    Attachment, AuditDetailRow, AuditFindingRow, AuditRecommendationRow, ComplianceDocumentRow,
    DetailDocumentRow, IncidentDocumentRow, PolicyDocumentRow, RiskDocumentRow, SourceRow,
};

const UNTITLED: &str = "Untitled";
const UNKNOWN: &str = "Unknown";
const NO_FINDING: &str = "N/A";

/// Where a base-name candidate comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameCandidate {
    /// A stored name or title, used as is
    Literal(Option<String>),

    /// A stored URL or path; its trailing segment is the name
    TrailingSegment(Option<String>),
}

impl NameCandidate {
    /// The usable name, if the candidate is non-blank
    pub fn resolve(&self) -> Option<String> {
        match self {
            NameCandidate::Literal(value) => value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string),
            NameCandidate::TrailingSegment(value) => value
                .as_deref()
                .and_then(crate::core::naming::trailing_segment),
        }
    }
}

/// Category-specific placement of one row's document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPlan {
    /// Label announced when a new group of rows starts
    pub group: String,

    /// Unsanitized folder segments below the category root
    pub folders: Vec<String>,

    /// Whether the row lacks the metadata its folders are built from
    pub missing_metadata: bool,

    /// Base-name candidates, first non-blank wins
    pub name_candidates: Vec<NameCandidate>,

    /// Base name when every candidate is blank
    pub fallback_name: String,

    /// Prepended to the final file name
    pub name_prefix: Option<String>,

    /// Stored URL or path used for extension inference
    pub declared_path: Option<String>,

    /// Declared MIME type used for extension inference
    pub content_type: Option<String>,
}

impl DocumentPlan {
    fn new(group: String, folders: Vec<String>, fallback_name: String) -> Self {
        Self {
            group,
            folders,
            missing_metadata: false,
            name_candidates: Vec::new(),
            fallback_name,
            name_prefix: None,
            declared_path: None,
            content_type: None,
        }
    }

    fn candidates(mut self, candidates: Vec<NameCandidate>) -> Self {
        self.name_candidates = candidates;
        self
    }

    /// Base name before extension and prefix
    pub fn base_name(&self) -> String {
        self.name_candidates
            .iter()
            .find_map(NameCandidate::resolve)
            .unwrap_or_else(|| self.fallback_name.clone())
    }
}

/// Build the plan for `row`, the `row_index`-th row of its category (1-based)
pub fn plan(row: &SourceRow, row_index: u64) -> DocumentPlan {
    match row {
        SourceRow::Risk(r) => plan_risk(r),
        SourceRow::Incident(r) => plan_incident(r, row_index),
        SourceRow::Control(r) => plan_detail("Control", "control", r),
        SourceRow::Action(r) => plan_detail("Action", "action", r),
        SourceRow::Compliance(r) => plan_compliance(r, row_index),
        SourceRow::AuditRecommendation(r) => plan_audit_recommendation(r),
        SourceRow::AuditDetail(r) => plan_audit_detail(r),
        SourceRow::AuditFinding(r) => plan_audit_finding(r),
        SourceRow::Policy(r) => plan_policy(r),
    }
}

fn text_or(value: &Option<String>, default: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn plan_risk(r: &RiskDocumentRow) -> DocumentPlan {
    let field_name = text_or(&r.field_name, UNKNOWN);
    let risk_code = text_or(&r.risk_code, UNKNOWN);
    let risk_title = text_or(&r.risk_title, UNTITLED);

    DocumentPlan::new(
        format!("{field_name} → {risk_code} - {risk_title}"),
        vec![field_name, risk_code],
        format!("risk_document_{}", r.assessment_document_id),
    )
    .candidates(vec![
        NameCandidate::Literal(r.file_name.clone()),
        NameCandidate::Literal(r.title.clone()),
    ])
}

fn plan_incident(r: &IncidentDocumentRow, row_index: u64) -> DocumentPlan {
    let code = text_or(&r.incident_code, UNKNOWN);

    let mut plan = DocumentPlan::new(
        code.clone(),
        vec![code.clone()],
        format!("Document_{row_index}"),
    )
    .candidates(vec![NameCandidate::Literal(r.name.clone())]);
    plan.name_prefix = Some(format!("{code}_"));
    plan.declared_path = r.file_path.clone();
    plan
}

fn plan_detail(label: &str, key: &str, r: &DetailDocumentRow) -> DocumentPlan {
    let title = text_or(&r.title, UNTITLED);

    DocumentPlan::new(
        format!("{label} ID {} - {title}", r.detail_id),
        vec![format!("{label}_{}_{title}", r.detail_id)],
        format!("{key}_document_{}", r.detail_id),
    )
    .candidates(vec![
        NameCandidate::Literal(r.file_name.clone()),
        NameCandidate::Literal(r.title.clone()),
    ])
}

fn plan_compliance(r: &ComplianceDocumentRow, row_index: u64) -> DocumentPlan {
    let app = text_or(&r.application_folder, UNKNOWN);
    let entity = text_or(&r.entity_folder, UNKNOWN);

    let mut plan = DocumentPlan::new(
        format!("{app} → {entity}"),
        vec![app, entity],
        format!("document_{row_index}"),
    )
    .candidates(vec![NameCandidate::TrailingSegment(r.file_path.clone())]);
    plan.missing_metadata = is_blank(&r.application_folder) || is_blank(&r.entity_folder);
    plan.declared_path = r.file_path.clone();
    plan
}

fn attachment_plan(group: String, folders: Vec<String>, a: &Attachment) -> DocumentPlan {
    let mut plan = DocumentPlan::new(group, folders, format!("attachment_{}", a.attachment_id))
        .candidates(vec![
            NameCandidate::TrailingSegment(a.document_url.clone()),
            NameCandidate::Literal(a.title.clone()),
        ]);
    plan.declared_path = a.document_url.clone();
    plan.content_type = a.content_type.clone();
    plan
}

fn plan_audit_recommendation(r: &AuditRecommendationRow) -> DocumentPlan {
    let no = text_or(&r.recommendation_no, UNKNOWN);
    let title = text_or(&r.recommendation_title, UNTITLED);

    attachment_plan(
        format!("Recommendation: {no} - {title}"),
        vec![format!("Recommendation_{no}_{title}")],
        &r.attachment,
    )
}

fn plan_audit_detail(r: &AuditDetailRow) -> DocumentPlan {
    let no = text_or(&r.audit_no, UNKNOWN);
    let title = text_or(&r.audit_title, UNTITLED);

    attachment_plan(
        format!("Audit: {no} - {title}"),
        vec![format!("{no}_{title}")],
        &r.attachment,
    )
}

fn plan_audit_finding(r: &AuditFindingRow) -> DocumentPlan {
    let no = text_or(&r.audit_no, UNKNOWN);
    let title = text_or(&r.audit_title, UNTITLED);
    let finding = text_or(&r.finding_no, NO_FINDING);

    attachment_plan(
        format!("Audit: {no} - {title}"),
        vec![format!("{no}_{title}"), format!("Finding_{finding}")],
        &r.attachment,
    )
}

fn plan_policy(r: &PolicyDocumentRow) -> DocumentPlan {
    let code = text_or(&r.code, UNKNOWN);
    let title = text_or(&r.title, UNTITLED);

    let mut plan = DocumentPlan::new(
        format!("Policy: {code} - {title}"),
        vec![format!("{code}_{title}")],
        format!("policy_document_{}", r.document_id),
    )
    .candidates(vec![
        NameCandidate::TrailingSegment(r.file_path.clone()),
        NameCandidate::Literal(r.document_name.clone()),
    ]);
    plan.declared_path = r.file_path.clone();
    plan
}
