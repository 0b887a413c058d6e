//! Dispatch-level errors and their envelope status codes.

use thiserror::Error;

/// Faults detected at the dispatch boundary.
///
/// These are the only failures that escape the 200 envelope. Domain
/// validation problems and backend-reported errors are described inside
/// success bodies instead, so the orchestrator can relay them verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The invocation carried no parameters but the action group requires
    /// an operation argument.
    #[error("Missing parameters")]
    MissingParameters,

    /// The api path is not registered on the action group.
    #[error("{0} is not a valid API path.")]
    UnknownApiPath(String),

    /// Anything unanticipated, including argument decode failures.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Envelope status code for this error class.
    pub fn status_code(&self) -> u16 {
        match self {
            DispatchError::MissingParameters | DispatchError::UnknownApiPath(_) => 400,
            DispatchError::Internal(_) => 500,
        }
    }

    /// True for request-shape errors the caller can correct.
    pub fn is_client_error(&self) -> bool {
        self.status_code() == 400
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        DispatchError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(DispatchError::MissingParameters.status_code(), 400);
        assert_eq!(
            DispatchError::UnknownApiPath("/nope".to_string()).status_code(),
            400
        );
        assert!(DispatchError::MissingParameters.is_client_error());
    }

    #[test]
    fn internal_errors_map_to_500() {
        let error = DispatchError::Internal("boom".to_string());
        assert_eq!(error.status_code(), 500);
        assert!(!error.is_client_error());
    }

    #[test]
    fn messages_match_the_wire_contract() {
        assert_eq!(DispatchError::MissingParameters.to_string(), "Missing parameters");
        assert_eq!(
            DispatchError::UnknownApiPath("/get_vm_details".to_string()).to_string(),
            "/get_vm_details is not a valid API path."
        );
        assert_eq!(
            DispatchError::Internal("expected value at line 1".to_string()).to_string(),
            "Internal server error: expected value at line 1"
        );
    }

    #[test]
    fn decode_failures_become_internal_errors() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = DispatchError::from(source);
        assert!(matches!(error, DispatchError::Internal(_)));
        assert_eq!(error.status_code(), 500);
    }
}
