//! Result records and backend-facing shapes for automation operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::time::serialize_opt_timestamp;

/// Parameter names declared by a command document, split by whether the
/// document supplies a default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentParameters {
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

impl DocumentParameters {
    /// Whether the document declares a parameter under this name.
    pub fn declares(&self, name: &str) -> bool {
        self.required.iter().chain(self.optional.iter()).any(|p| p == name)
    }
}

/// One target selector for a command dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandTarget {
    pub key: String,
    pub values: Vec<String>,
}

/// Per-instance invocation of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub instance_id: Option<String>,
    pub status: String,
}

/// Identity row for the baseline listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatchBaselineIdentity {
    pub baseline_id: String,
    pub baseline_name: Option<String>,
    pub operating_system: Option<String>,
    pub description: Option<String>,
}

/// Full description of one patch baseline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatchBaselineDetail {
    pub baseline_id: String,
    pub name: Option<String>,
    pub operating_system: Option<String>,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_rules: Option<Value>,
    #[serde(
        serialize_with = "serialize_opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(
        serialize_with = "serialize_opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_date: Option<DateTime<Utc>>,
}

/// Backend-facing payload for baseline creation, defaults already applied.
#[derive(Debug, Clone, Serialize)]
pub struct NewPatchBaseline {
    pub name: String,
    pub operating_system: String,
    pub description: String,
    pub compliance_level: String,
    pub approval_rules: Option<Value>,
}

/// Backend-facing payload for a baseline update. `None` fields are left
/// untouched by the backend.
#[derive(Debug, Clone, Serialize)]
pub struct PatchBaselineUpdate {
    pub baseline_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub approval_rules: Option<Value>,
}
