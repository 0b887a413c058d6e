//! Response envelope returned to the orchestrator.

use serde::{Deserialize, Serialize};

use super::request::InvocationRequest;

/// Protocol version stamped on every envelope.
pub const MESSAGE_VERSION: &str = "1.0";

/// Payload under the envelope's media-type key. The body is always a
/// pre-serialized JSON string, not a nested object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTypeBody {
    pub body: String,
}

/// The `responseBody` map keyed by media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(rename = "application/json")]
    pub application_json: MediaTypeBody,
}

/// Inner response echoing the request coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    pub http_status_code: u16,
    pub response_body: ResponseBody,
}

/// Fixed wrapper required by the orchestrator protocol.
///
/// `http_status_code` carries the outcome class (200 success, 400 client
/// error, 500 internal failure). A 200 does not preclude the body itself
/// describing a backend-reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub message_version: String,
    pub response: ActionResponse,
}

impl ResponseEnvelope {
    /// Wrap an already-serialized payload for the given request.
    pub fn new(request: &InvocationRequest, status_code: u16, body: impl Into<String>) -> Self {
        Self {
            message_version: MESSAGE_VERSION.to_string(),
            response: ActionResponse {
                action_group: request.action_group.clone(),
                api_path: request.api_path.clone(),
                http_method: request.http_method.clone(),
                http_status_code: status_code,
                response_body: ResponseBody {
                    application_json: MediaTypeBody { body: body.into() },
                },
            },
        }
    }

    /// Envelope whose body is an `{"error": ...}` object.
    pub fn error(request: &InvocationRequest, status_code: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self::new(request, status_code, body)
    }

    pub fn status_code(&self) -> u16 {
        self.response.http_status_code
    }

    /// Raw string body under the media-type key.
    pub fn body(&self) -> &str {
        &self.response.response_body.application_json.body
    }

    /// Parse the body back into JSON.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(self.body())
    }
}
