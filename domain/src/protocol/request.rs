//! Invocation request shape received from the orchestrator.

use serde::{Deserialize, Serialize};

/// A single named parameter on an invocation request.
///
/// By convention the first parameter carries the whole operation argument.
/// Its value is either a plain identifier (instance id, document name) or a
/// JSON-encoded payload, depending on the operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParameter {
    pub name: String,
    pub value: String,
}

impl RequestParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Tool invocation issued by the orchestrator.
///
/// `api_path` selects exactly one operation within the action group. The
/// coordinates (`action_group`, `api_path`, `http_method`) are echoed back
/// verbatim in the response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    #[serde(default)]
    pub parameters: Vec<RequestParameter>,
    /// Free-text user utterance forwarded by the orchestrator. Logged only,
    /// never routed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
}

impl InvocationRequest {
    pub fn new(
        action_group: impl Into<String>,
        api_path: impl Into<String>,
        http_method: impl Into<String>,
    ) -> Self {
        Self {
            action_group: action_group.into(),
            api_path: api_path.into(),
            http_method: http_method.into(),
            parameters: Vec::new(),
            input_text: None,
        }
    }

    /// Attach the operation argument as the first parameter.
    pub fn with_argument(mut self, value: impl Into<String>) -> Self {
        self.parameters
            .push(RequestParameter::new("query", value.into()));
        self
    }

    /// Value of the first parameter, when any parameter is present.
    pub fn argument(&self) -> Option<&str> {
        self.parameters.first().map(|p| p.value.as_str())
    }
}
