//! Typed argument schemas for automation operations.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use super::records::CommandTarget;

/// Accept either a structured value or a JSON string encoding one.
///
/// Orchestrators sometimes double-encode nested payload fields, so
/// `"parameters": "{\"commands\": [\"uptime\"]}"` and the structured form
/// must decode identically.
fn json_or_embedded<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(encoded)) => serde_json::from_str(&encoded)
            .map(Some)
            .map_err(de::Error::custom),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(de::Error::custom),
    }
}

/// Argument for `/execute_ssm_document`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecuteDocumentRequest {
    #[serde(default)]
    pub document_name: Option<String>,
    /// Document parameters, name to value list.
    #[serde(default, deserialize_with = "json_or_embedded")]
    pub parameters: Option<HashMap<String, Vec<String>>>,
    /// Target selectors passed through to the command dispatch.
    #[serde(default, deserialize_with = "json_or_embedded")]
    pub targets: Option<Vec<CommandTarget>>,
}

impl ExecuteDocumentRequest {
    /// All three fields, when each is present and non-empty.
    pub fn complete(
        &self,
    ) -> Option<(&str, &HashMap<String, Vec<String>>, &[CommandTarget])> {
        let name = self.document_name.as_deref().filter(|n| !n.is_empty())?;
        let parameters = self.parameters.as_ref().filter(|p| !p.is_empty())?;
        let targets = self.targets.as_deref().filter(|t| !t.is_empty())?;
        Some((name, parameters, targets))
    }
}

/// Argument for `/create_patch_baseline`. Only `name` is required; the
/// handler fills the remaining fields from its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePatchBaselineRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub operating_system: Option<String>,
    #[serde(default)]
    pub approval_rules: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub compliance_level: Option<String>,
}

/// Argument for `/update_patch_baseline`. Absent fields stay untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePatchBaselineRequest {
    #[serde(default)]
    pub baseline_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub approval_rules: Option<Value>,
}

/// Argument for `/register_patch_group`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterPatchGroupRequest {
    #[serde(default)]
    pub baseline_id: Option<String>,
    #[serde(default)]
    pub patch_group: Option<String>,
}
