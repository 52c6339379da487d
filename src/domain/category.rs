//! Document categories
//!
//! Each category is one independent document source with its own table
//! joins, folder root and naming rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the nine document sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Risk,
    Incident,
    Control,
    Action,
    Compliance,
    AuditRecommendation,
    AuditDetail,
    AuditFinding,
    Policy,
}

impl Category {
    /// All categories in run order
    pub const ALL: [Category; 9] = [
        Category::Risk,
        Category::Incident,
        Category::Control,
        Category::Action,
        Category::Compliance,
        Category::AuditRecommendation,
        Category::AuditDetail,
        Category::AuditFinding,
        Category::Policy,
    ];

    /// Key used on the command line and in configuration files
    pub fn key(&self) -> &'static str {
        match self {
            Category::Risk => "risk",
            Category::Incident => "incident",
            Category::Control => "control",
            Category::Action => "action",
            Category::Compliance => "compliance",
            Category::AuditRecommendation => "audit_recommendation",
            Category::AuditDetail => "audit_detail",
            Category::AuditFinding => "audit_finding",
            Category::Policy => "policy",
        }
    }

    /// Human-readable name used in headers and summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Risk => "Risk Documents",
            Category::Incident => "Incident Documents",
            Category::Control => "Control Documents",
            Category::Action => "Action Documents",
            Category::Compliance => "Compliance Documents",
            Category::AuditRecommendation => "Audit Recommendation Documents",
            Category::AuditDetail => "Audit Details Documents",
            Category::AuditFinding => "Audit Finding Documents",
            Category::Policy => "Policy Documents",
        }
    }

    /// Folder below the base directory that holds this category's tree
    ///
    /// Compliance documents have no root of their own: their application
    /// folder (`Compliance`, `Policy`, ...) sits directly under the base.
    /// Such a folder can coincide with another category's root; the run-wide
    /// path allocator keeps the two trees from overwriting each other.
    pub fn root_folder(&self) -> Option<&'static str> {
        match self {
            Category::Risk => Some("Risk"),
            Category::Incident => Some("Incident"),
            Category::Control => Some("Control"),
            Category::Action => Some("Action"),
            Category::Compliance => None,
            Category::AuditRecommendation => Some("Audit_Recommendations"),
            Category::AuditDetail => Some("Audit_Details_Attachments"),
            Category::AuditFinding => Some("Audit_Finding_Attachments"),
            Category::Policy => Some("Policy"),
        }
    }

    /// Extension appended when nothing better can be inferred
    pub fn default_extension(&self) -> &'static str {
        match self {
            Category::Risk | Category::Control | Category::Action => ".docx",
            _ => ".bin",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|c| c.key() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown category '{}'. Must be one of: {}",
                    s,
                    Category::ALL.map(|c| c.key()).join(", ")
                )
            })
    }
}

/// Parse a comma-separated category list, preserving run order
///
/// An empty list selects every category.
pub fn parse_category_list<S: AsRef<str>>(items: &[S]) -> Result<Vec<Category>, String> {
    let mut selected = Vec::new();
    for item in items {
        for part in item.as_ref().split(',').filter(|p| !p.trim().is_empty()) {
            selected.push(Category::from_str(part)?);
        }
    }

    if selected.is_empty() {
        return Ok(Category::ALL.to_vec());
    }

    Ok(Category::ALL
        .into_iter()
        .filter(|c| selected.contains(c))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.key()).unwrap(), category);
        }
    }

    #[test]
    fn test_category_from_str_accepts_dashes_and_case() {
        assert_eq!(
            Category::from_str("Audit-Finding").unwrap(),
            Category::AuditFinding
        );
        assert_eq!(Category::from_str(" POLICY ").unwrap(), Category::Policy);
    }

    #[test]
    fn test_category_from_str_unknown() {
        let err = Category::from_str("invoices").unwrap_err();
        assert!(err.contains("Unknown category"));
        assert!(err.contains("audit_detail"));
    }

    #[test]
    fn test_root_folders() {
        assert_eq!(Category::Risk.root_folder(), Some("Risk"));
        assert_eq!(
            Category::AuditFinding.root_folder(),
            Some("Audit_Finding_Attachments")
        );
        assert_eq!(Category::Compliance.root_folder(), None);
    }

    #[test]
    fn test_default_extensions() {
        assert_eq!(Category::Risk.default_extension(), ".docx");
        assert_eq!(Category::Control.default_extension(), ".docx");
        assert_eq!(Category::Action.default_extension(), ".docx");
        assert_eq!(Category::Policy.default_extension(), ".bin");
        assert_eq!(Category::Incident.default_extension(), ".bin");
    }

    #[test]
    fn test_parse_category_list_empty_selects_all() {
        let empty: [&str; 0] = [];
        assert_eq!(parse_category_list(&empty).unwrap(), Category::ALL.to_vec());
    }

    #[test]
    fn test_parse_category_list_keeps_run_order() {
        let selected = parse_category_list(&["policy,risk", "incident"]).unwrap();
        assert_eq!(
            selected,
            vec![Category::Risk, Category::Incident, Category::Policy]
        );
    }

    #[test]
    fn test_parse_category_list_rejects_unknown() {
        assert!(parse_category_list(&["risk,bogus"]).is_err());
    }
}
