//! Category queries
//!
//! One SELECT per category against the PostgreSQL copy of the GRC schema.
//! Column aliases are the names the row decoder reads. Every query filters
//! out NULL blobs and soft-deleted documents and orders rows so that
//! documents of one group arrive together.

use crate::domain::Category;

pub const RISK: &str = "
SELECT
    radoc.assessmentdocumentid AS assessment_document_id,
    rrt.fieldname AS field_name,
    radet.riskcode AS risk_code,
    radet.title AS risk_title,
    radoc.title AS title,
    radoc.filename AS file_name,
    radoc.filedata AS file_data
FROM risk_assessmentdocument AS radoc
INNER JOIN risk_assessmentdetail AS radet
    ON radet.assessmentdetailid = radoc.assessmentdetailid
INNER JOIN risk_risktype AS rrt
    ON rrt.risktypeid = radet.risktypeid
ORDER BY radet.risktypeid, radet.riskcode";

pub const INCIDENT: &str = "
SELECT
    i.incidentcode AS incident_code,
    i.incidenttitle AS incident_title,
    e.name AS name,
    e.filepath AS file_path,
    e.file AS file_data
FROM incident AS i
INNER JOIN entitydocument AS e
    ON e.objectdataid = i.incidentid
WHERE e.file IS NOT NULL AND COALESCE(e.isdeleted, 0) = 0
ORDER BY i.incidentcode";

pub const CONTROL: &str = "
SELECT
    b.controldetailid AS detail_id,
    a.title AS title,
    b.filename AS file_name,
    b.filedata AS file_data
FROM controldetails AS a
INNER JOIN controldocuments AS b
    ON a.id = b.controldetailid
ORDER BY b.controldetailid";

pub const ACTION: &str = "
SELECT
    actiondetailid AS detail_id,
    title AS title,
    filename AS file_name,
    filedata AS file_data
FROM action_document
ORDER BY actiondetailid";

pub const COMPLIANCE: &str = "
SELECT application_folder, entity_folder, file_data, file_path
FROM (
    SELECT
        CASE
            WHEN i.incidentid IS NOT NULL THEN 'Incident_Linked_Compliance_Documents'
            WHEN c.complianceid IS NOT NULL THEN 'Compliance'
            WHEN ad.authoritydocumentid IS NOT NULL THEN 'AuthorityDocument'
            WHEN p.policyid IS NOT NULL THEN 'Policy'
        END AS application_folder,
        CASE
            WHEN i.incidentid IS NOT NULL THEN i.incidentcode || ' - ' || i.incidenttitle
            WHEN c.complianceid IS NOT NULL THEN c.code || ' - ' || c.title
            WHEN ad.authoritydocumentid IS NOT NULL THEN ad.code || ' - ' || ad.title
            WHEN p.policyid IS NOT NULL THEN p.code || ' - ' || p.title
        END AS entity_folder,
        ed.file AS file_data,
        ed.filepath AS file_path
    FROM entitydocument AS ed
    LEFT OUTER JOIN incident AS i
        ON ed.objectdataid = i.incidentid AND ed.imsapplicationid = 1
    LEFT OUTER JOIN compliance AS c
        ON ed.objectdataid = c.complianceid AND ed.imsapplicationid = 2 AND ed.imssubapplicationid = 3
    LEFT OUTER JOIN authoritydocument AS ad
        ON ed.objectdataid = ad.authoritydocumentid AND ed.imsapplicationid = 2 AND ed.imssubapplicationid = 4
    LEFT OUTER JOIN policy AS p
        ON ed.objectdataid = p.policyid AND ed.imsapplicationid = 2 AND ed.imssubapplicationid = 5
    WHERE ed.file IS NOT NULL AND COALESCE(ed.isdeleted, 0) = 0
) AS docs
ORDER BY application_folder, entity_folder";

pub const AUDIT_RECOMMENDATION: &str = "
SELECT
    ar.recommendationno AS recommendation_no,
    ar.recommendationtitle AS recommendation_title,
    a.attachmentid AS attachment_id,
    a.title AS title,
    a.documenturl AS document_url,
    a.contenttype AS content_type,
    a.filedata AS file_data
FROM auditrecommendation AS ar
INNER JOIN attachment AS a
    ON ar.recommendationid = a.objectid
WHERE a.filedata IS NOT NULL AND COALESCE(a.deleted, 0) = 0
ORDER BY ar.recommendationno";

pub const AUDIT_DETAIL: &str = "
SELECT
    ad.auditno AS audit_no,
    ad.audittitle AS audit_title,
    a.attachmentid AS attachment_id,
    a.title AS title,
    a.documenturl AS document_url,
    a.contenttype AS content_type,
    a.filedata AS file_data
FROM auditdetail AS ad
INNER JOIN attachment AS a
    ON ad.auditdetailid = a.objectid
WHERE a.filedata IS NOT NULL AND COALESCE(a.deleted, 0) = 0
ORDER BY ad.auditno";

pub const AUDIT_FINDING: &str = "
SELECT
    ad.auditno AS audit_no,
    ad.audittitle AS audit_title,
    af.auditfindingno AS finding_no,
    a.attachmentid AS attachment_id,
    a.title AS title,
    a.documenturl AS document_url,
    a.contenttype AS content_type,
    a.filedata AS file_data
FROM auditfinding AS af
INNER JOIN auditdetail AS ad
    ON af.auditdetailid = ad.auditdetailid
INNER JOIN attachment AS a
    ON af.auditfindingid = a.objectid
WHERE a.filedata IS NOT NULL AND COALESCE(a.deleted, 0) = 0
ORDER BY ad.auditno, af.auditfindingno";

pub const POLICY: &str = "
SELECT
    p.policyid AS policy_id,
    p.code AS code,
    p.title AS title,
    ed.documentid AS document_id,
    ed.name AS document_name,
    ed.filepath AS file_path,
    ed.file AS file_data
FROM policy AS p
INNER JOIN entitydocument AS ed
    ON p.objectid = ed.objectid
WHERE ed.file IS NOT NULL
    AND COALESCE(ed.isdeleted, 0) = 0
    AND COALESCE(p.isdeleted, 0) = 0
ORDER BY p.code, p.title";

/// The SELECT statement for `category`
pub fn query_for(category: Category) -> &'static str {
    match category {
        Category::Risk => RISK,
        Category::Incident => INCIDENT,
        Category::Control => CONTROL,
        Category::Action => ACTION,
        Category::Compliance => COMPLIANCE,
        Category::AuditRecommendation => AUDIT_RECOMMENDATION,
        Category::AuditDetail => AUDIT_DETAIL,
        Category::AuditFinding => AUDIT_FINDING,
        Category::Policy => POLICY,
    }
}
