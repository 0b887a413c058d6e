//! Result records and backend-facing shapes for support operations.

use serde::{Deserialize, Serialize};

/// Backend-facing payload for case creation, defaults and enrichment
/// already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSupportCase {
    pub subject: String,
    pub service_code: String,
    pub category_code: String,
    pub severity_code: String,
    pub communication_body: String,
    pub cc_email_addresses: Vec<String>,
    pub language: String,
    pub issue_type: String,
}

impl NewSupportCase {
    /// Copy of this case with a different service/category classification.
    pub fn with_classification(&self, service_code: &str, category_code: &str) -> Self {
        Self {
            service_code: service_code.to_string(),
            category_code: category_code.to_string(),
            ..self.clone()
        }
    }
}

/// Case row for listings. The handler truncates communications and
/// normalizes timestamps before serializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportCase {
    pub case_id: String,
    pub subject: Option<String>,
    pub status: Option<String>,
    pub service_code: Option<String>,
    pub category_code: Option<String>,
    pub severity_code: Option<String>,
    pub submitted_time: Option<String>,
    #[serde(default)]
    pub recent_communications: Vec<CaseCommunication>,
}

/// One case communication; wire casing follows the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseCommunication {
    pub body: Option<String>,
    pub submitted_by: Option<String>,
    pub time_created: Option<String>,
}
