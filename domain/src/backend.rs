//! Error contract shared by all backend collaborators.

use serde::{Deserialize, Serialize};

/// Stable machine-readable codes that dispatch logic matches on.
pub mod codes {
    /// The referenced resource does not exist on the backend.
    pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";
    /// The backend rejected the parameter combination.
    pub const INVALID_PARAMETER_VALUE: &str = "InvalidParameterValueException";
    /// The account's support tier does not include the requested API.
    pub const SUBSCRIPTION_REQUIRED: &str = "SubscriptionRequiredException";
}

/// Failure reported by a backend collaborator.
///
/// Carries a stable code plus a human-readable message. Handlers translate
/// these into descriptive payloads inside 200 envelopes; a backend error is
/// never propagated past the dispatch boundary as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendError {
    pub code: String,
    pub message: String,
}

impl BackendError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            codes::RESOURCE_NOT_FOUND,
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(codes::INVALID_PARAMETER_VALUE, message)
    }

    pub fn subscription_required() -> Self {
        Self::new(
            codes::SUBSCRIPTION_REQUIRED,
            "The account does not have a support plan that includes this API",
        )
    }

    pub fn is_not_found(&self) -> bool {
        self.code == codes::RESOURCE_NOT_FOUND
    }

    pub fn is_invalid_parameter(&self) -> bool {
        self.code == codes::INVALID_PARAMETER_VALUE
    }

    pub fn is_subscription_required(&self) -> bool {
        self.code == codes::SUBSCRIPTION_REQUIRED
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for BackendError {}

pub type BackendResult<T> = Result<T, BackendError>;
