//! Decoding driver rows into [`SourceRow`]s
//!
//! Columns are read by alias name, so the decoder does not depend on the
//! column order of the category queries.

use crate::domain::{
    Attachment, AuditDetailRow, AuditFindingRow, AuditRecommendationRow, Category,
    ComplianceDocumentRow, DetailDocumentRow, IncidentDocumentRow, PolicyDocumentRow,
    RiskDocumentRow, SourceError, SourceRow,
};
use tokio_postgres::types::FromSql;
use tokio_postgres::Row;
use uuid::Uuid;

type DecodeResult<T> = Result<T, SourceError>;

/// Typed access to the columns of one fetched row
pub(crate) trait Columns {
    fn text(&self, column: &str) -> DecodeResult<Option<String>>;
    fn int(&self, column: &str) -> DecodeResult<i32>;
    fn uuid(&self, column: &str) -> DecodeResult<Uuid>;
    fn bytes(&self, column: &str) -> DecodeResult<Option<Vec<u8>>>;
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, column: &str) -> DecodeResult<T> {
    row.try_get(column).map_err(|e| SourceError::DecodeFailed {
        column: column.to_string(),
        message: e.to_string(),
    })
}

impl Columns for Row {
    fn text(&self, column: &str) -> DecodeResult<Option<String>> {
        get(self, column)
    }

    fn int(&self, column: &str) -> DecodeResult<i32> {
        get(self, column)
    }

    fn uuid(&self, column: &str) -> DecodeResult<Uuid> {
        get(self, column)
    }

    fn bytes(&self, column: &str) -> DecodeResult<Option<Vec<u8>>> {
        get(self, column)
    }
}

/// Decode a driver row fetched with the query for `category`
pub fn decode_row(category: Category, row: &Row) -> DecodeResult<SourceRow> {
    decode(category, row)
}

pub(crate) fn decode<C: Columns + ?Sized>(category: Category, row: &C) -> DecodeResult<SourceRow> {
    let decoded = match category {
        Category::Risk => SourceRow::Risk(RiskDocumentRow {
            assessment_document_id: row.int("assessment_document_id")?,
            field_name: row.text("field_name")?,
            risk_code: row.text("risk_code")?,
            risk_title: row.text("risk_title")?,
            title: row.text("title")?,
            file_name: row.text("file_name")?,
            file_data: row.bytes("file_data")?,
        }),
        Category::Incident => SourceRow::Incident(IncidentDocumentRow {
            incident_code: row.text("incident_code")?,
            incident_title: row.text("incident_title")?,
            name: row.text("name")?,
            file_path: row.text("file_path")?,
            file_data: row.bytes("file_data")?,
        }),
        Category::Control => SourceRow::Control(detail(row)?),
        Category::Action => SourceRow::Action(detail(row)?),
        Category::Compliance => SourceRow::Compliance(ComplianceDocumentRow {
            application_folder: row.text("application_folder")?,
            entity_folder: row.text("entity_folder")?,
            file_path: row.text("file_path")?,
            file_data: row.bytes("file_data")?,
        }),
        Category::AuditRecommendation => SourceRow::AuditRecommendation(AuditRecommendationRow {
            recommendation_no: row.text("recommendation_no")?,
            recommendation_title: row.text("recommendation_title")?,
            attachment: attachment(row)?,
        }),
        Category::AuditDetail => SourceRow::AuditDetail(AuditDetailRow {
            audit_no: row.text("audit_no")?,
            audit_title: row.text("audit_title")?,
            attachment: attachment(row)?,
        }),
        Category::AuditFinding => SourceRow::AuditFinding(AuditFindingRow {
            audit_no: row.text("audit_no")?,
            audit_title: row.text("audit_title")?,
            finding_no: row.text("finding_no")?,
            attachment: attachment(row)?,
        }),
        Category::Policy => SourceRow::Policy(PolicyDocumentRow {
            policy_id: row.int("policy_id")?,
            code: row.text("code")?,
            title: row.text("title")?,
            document_id: row.int("document_id")?,
            document_name: row.text("document_name")?,
            file_path: row.text("file_path")?,
            file_data: row.bytes("file_data")?,
        }),
    };
    Ok(decoded)
}

fn detail<C: Columns + ?Sized>(row: &C) -> DecodeResult<DetailDocumentRow> {
    Ok(DetailDocumentRow {
        detail_id: row.int("detail_id")?,
        title: row.text("title")?,
        file_name: row.text("file_name")?,
        file_data: row.bytes("file_data")?,
    })
}

fn attachment<C: Columns + ?Sized>(row: &C) -> DecodeResult<Attachment> {
    Ok(Attachment {
        attachment_id: row.uuid("attachment_id")?,
        title: row.text("title")?,
        document_url: row.text("document_url")?,
        content_type: row.text("content_type")?,
        file_data: row.bytes("file_data")?,
    })
}
