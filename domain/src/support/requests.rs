//! Typed argument schemas for support operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Argument for `/create_support_case`. Only subject and body are
/// required; classification fields fall back to the handler's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSupportCaseRequest {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub communication_body: Option<String>,
    #[serde(default)]
    pub service_code: Option<String>,
    #[serde(default)]
    pub category_code: Option<String>,
    #[serde(default)]
    pub severity_code: Option<String>,
    #[serde(default)]
    pub cc_email_addresses: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Name of the agent reporting the problem, echoed in the error block.
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub error_details: Option<ErrorDetails>,
}

/// Structured error context attached by a reporting agent. Rendered as a
/// text block appended to the case body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetails {
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub context: Option<Value>,
}

impl ErrorDetails {
    /// True when no field carries information; empty details are not
    /// rendered.
    pub fn is_empty(&self) -> bool {
        self.error_type.is_none()
            && self.error_message.is_none()
            && self.timestamp.is_none()
            && self.context.is_none()
    }

    /// Render the block appended to the communication body.
    pub fn render(&self, agent_name: Option<&str>, default_timestamp: &str) -> String {
        let mut block = String::from("\n\n--- Error Details ---\n");
        block.push_str(&format!("Agent: {}\n", agent_name.unwrap_or("Unknown")));
        block.push_str(&format!(
            "Error Type: {}\n",
            self.error_type.as_deref().unwrap_or("Unknown")
        ));
        block.push_str(&format!(
            "Error Message: {}\n",
            self.error_message.as_deref().unwrap_or("No message provided")
        ));
        block.push_str(&format!(
            "Timestamp: {}\n",
            self.timestamp.as_deref().unwrap_or(default_timestamp)
        ));
        if let Some(context) = &self.context {
            let rendered =
                serde_json::to_string_pretty(context).unwrap_or_else(|_| context.to_string());
            block.push_str(&format!("\nContext: {rendered}\n"));
        }
        block
    }
}

/// Argument for `/get_support_cases`; doubles as the backend-facing query.
/// The whole object is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseFilters {
    #[serde(default)]
    pub include_resolved: bool,
    #[serde(default)]
    pub after_time: Option<String>,
    #[serde(default)]
    pub before_time: Option<String>,
    #[serde(default)]
    pub case_id_list: Vec<String>,
}

/// Argument for `/update_support_case`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSupportCaseRequest {
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub communication_body: Option<String>,
    #[serde(default)]
    pub cc_email_addresses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rendered_block_lists_every_line() {
        let details = ErrorDetails {
            error_type: Some("Timeout".to_string()),
            error_message: Some("deploy stalled".to_string()),
            timestamp: Some("2024-05-01T12:00:00Z".to_string()),
            context: None,
        };

        let block = details.render(Some("deployer"), "unused");
        assert_eq!(
            block,
            "\n\n--- Error Details ---\nAgent: deployer\nError Type: Timeout\nError Message: deploy stalled\nTimestamp: 2024-05-01T12:00:00Z\n"
        );
    }

    #[test]
    fn rendered_block_fills_absent_fields() {
        let details = ErrorDetails {
            error_message: Some("boom".to_string()),
            ..ErrorDetails::default()
        };

        let block = details.render(None, "2024-05-01T00:00:00Z");
        assert!(block.contains("Agent: Unknown\n"));
        assert!(block.contains("Error Type: Unknown\n"));
        assert!(block.contains("Timestamp: 2024-05-01T00:00:00Z\n"));
    }

    #[test]
    fn context_is_pretty_printed() {
        let details = ErrorDetails {
            context: Some(json!({ "region": "us-east-1" })),
            ..ErrorDetails::default()
        };

        let block = details.render(None, "t");
        assert!(block.contains("\nContext: {\n  \"region\": \"us-east-1\"\n}\n"));
    }

    #[test]
    fn empty_details_report_empty() {
        assert!(ErrorDetails::default().is_empty());
        let details = ErrorDetails {
            error_type: Some("x".to_string()),
            ..ErrorDetails::default()
        };
        assert!(!details.is_empty());
    }

    #[test]
    fn filters_default_to_open_cases_only() {
        let filters: CaseFilters = serde_json::from_str("{}").unwrap();
        assert!(!filters.include_resolved);
        assert!(filters.case_id_list.is_empty());
    }
}
