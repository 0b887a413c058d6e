//! Handle-invocation use case.
//!
//! The pipeline every action group shares: extract the raw argument, route
//! through the handler, and wrap whatever comes back in a response
//! envelope. Nothing escapes this boundary unenveloped.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use opsbridge_domain::dispatch::{DispatchError, RawArgument};
use opsbridge_domain::protocol::{InvocationRequest, ResponseEnvelope};
use opsbridge_domain::time::format_timestamp;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::action_groups::ActionGroupHandler;
use crate::ports::invocation_logger::{InvocationLogger, InvocationRecord, NoInvocationLogger};

/// Runs one invocation through a handler and produces the envelope.
pub struct HandleInvocation {
    logger: Arc<dyn InvocationLogger>,
}

impl HandleInvocation {
    pub fn new() -> Self {
        Self {
            logger: Arc::new(NoInvocationLogger),
        }
    }

    pub fn with_logger(logger: Arc<dyn InvocationLogger>) -> Self {
        Self { logger }
    }

    /// Execute the invocation. Every outcome, including every failure,
    /// terminates in a [`ResponseEnvelope`] echoing the request coordinates.
    pub async fn execute(
        &self,
        handler: &dyn ActionGroupHandler,
        request: &InvocationRequest,
    ) -> ResponseEnvelope {
        let started = Instant::now();
        info!(
            action_group = %request.action_group,
            api_path = %request.api_path,
            http_method = %request.http_method,
            "handling invocation"
        );
        if let Some(input_text) = &request.input_text {
            debug!(input_text = %input_text, "orchestrator input text");
        }

        let envelope = match self.run(handler, request).await {
            Ok(payload) => match serde_json::to_string(&payload) {
                Ok(body) => ResponseEnvelope::new(request, 200, body),
                Err(source) => {
                    error!(error = %source, "payload serialization failed");
                    let internal = DispatchError::Internal(source.to_string());
                    ResponseEnvelope::error(request, internal.status_code(), &internal.to_string())
                }
            },
            Err(dispatch_error) => {
                info!(
                    status = dispatch_error.status_code(),
                    error = %dispatch_error,
                    "dispatch failed"
                );
                ResponseEnvelope::error(
                    request,
                    dispatch_error.status_code(),
                    &dispatch_error.to_string(),
                )
            }
        };

        self.logger.log(&InvocationRecord {
            timestamp: format_timestamp(&Utc::now()),
            action_group: request.action_group.clone(),
            api_path: request.api_path.clone(),
            http_method: request.http_method.clone(),
            status: envelope.status_code(),
            duration_ms: started.elapsed().as_millis() as u64,
        });

        envelope
    }

    async fn run(
        &self,
        handler: &dyn ActionGroupHandler,
        request: &InvocationRequest,
    ) -> Result<Value, DispatchError> {
        let argument = match request.argument() {
            Some(value) => RawArgument::new(value),
            None if handler.requires_argument() => return Err(DispatchError::MissingParameters),
            None => RawArgument::default(),
        };

        handler.dispatch(&request.api_path, &argument).await
    }
}

impl Default for HandleInvocation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes a fixed payload; counts dispatches.
    struct StubHandler {
        requires_argument: bool,
        dispatches: AtomicUsize,
        payload: Value,
    }

    impl StubHandler {
        fn new(payload: Value) -> Self {
            Self {
                requires_argument: true,
                dispatches: AtomicUsize::new(0),
                payload,
            }
        }

        fn lenient(payload: Value) -> Self {
            Self {
                requires_argument: false,
                ..Self::new(payload)
            }
        }
    }

    #[async_trait]
    impl ActionGroupHandler for StubHandler {
        fn requires_argument(&self) -> bool {
            self.requires_argument
        }

        fn api_paths(&self) -> Vec<&'static str> {
            vec!["/known_path"]
        }

        async fn dispatch(
            &self,
            api_path: &str,
            _argument: &RawArgument,
        ) -> Result<Value, DispatchError> {
            self.dispatches.fetch_add(1, Ordering::SeqCst);
            if api_path == "/known_path" {
                Ok(self.payload.clone())
            } else {
                Err(DispatchError::UnknownApiPath(api_path.to_string()))
            }
        }
    }

    #[derive(Default)]
    struct CapturingLogger {
        records: Mutex<Vec<InvocationRecord>>,
    }

    impl InvocationLogger for CapturingLogger {
        fn log(&self, record: &InvocationRecord) {
            self.records.lock().unwrap().push(record.clone());
        }
    }

    fn request_with_argument() -> InvocationRequest {
        InvocationRequest::new("test_actions", "/known_path", "GET").with_argument("x")
    }

    #[tokio::test]
    async fn success_wraps_the_serialized_payload() {
        let handler = StubHandler::new(json!({ "message": "ok" }));
        let envelope = HandleInvocation::new()
            .execute(&handler, &request_with_argument())
            .await;

        assert_eq!(envelope.status_code(), 200);
        assert_eq!(envelope.body(), r#"{"message":"ok"}"#);
        assert_eq!(envelope.response.action_group, "test_actions");
        assert_eq!(envelope.response.api_path, "/known_path");
        assert_eq!(envelope.message_version, "1.0");
    }

    #[tokio::test]
    async fn missing_parameters_short_circuit_before_dispatch() {
        let handler = StubHandler::new(json!({}));
        let request = InvocationRequest::new("test_actions", "/known_path", "GET");
        let envelope = HandleInvocation::new().execute(&handler, &request).await;

        assert_eq!(envelope.status_code(), 400);
        assert_eq!(
            envelope.body_json().unwrap(),
            json!({ "error": "Missing parameters" })
        );
        assert_eq!(handler.dispatches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lenient_handlers_receive_an_empty_argument() {
        let handler = StubHandler::lenient(json!({ "cases": [] }));
        let request = InvocationRequest::new("test_actions", "/known_path", "GET");
        let envelope = HandleInvocation::new().execute(&handler, &request).await;

        assert_eq!(envelope.status_code(), 200);
        assert_eq!(handler.dispatches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_path_becomes_a_400_envelope() {
        let handler = StubHandler::new(json!({}));
        let request =
            InvocationRequest::new("test_actions", "/other_path", "GET").with_argument("x");
        let envelope = HandleInvocation::new().execute(&handler, &request).await;

        assert_eq!(envelope.status_code(), 400);
        assert_eq!(
            envelope.body_json().unwrap(),
            json!({ "error": "/other_path is not a valid API path." })
        );
        assert_eq!(envelope.response.api_path, "/other_path");
    }

    #[tokio::test]
    async fn logger_sees_one_record_per_invocation() {
        let logger = Arc::new(CapturingLogger::default());
        let use_case = HandleInvocation::with_logger(logger.clone());
        let handler = StubHandler::new(json!({ "message": "ok" }));

        use_case.execute(&handler, &request_with_argument()).await;
        let request = InvocationRequest::new("test_actions", "/known_path", "GET");
        use_case.execute(&handler, &request).await;

        let records = logger.records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, 200);
        assert_eq!(records[0].api_path, "/known_path");
        assert_eq!(records[1].status, 400);
    }

    #[tokio::test]
    async fn envelope_round_trips_through_serde() {
        let handler = StubHandler::new(json!({ "instances": [] }));
        let envelope = HandleInvocation::new()
            .execute(&handler, &request_with_argument())
            .await;

        let wire = serde_json::to_string(&envelope).unwrap();
        let back: ResponseEnvelope = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, envelope);
        assert_eq!(back.body_json().unwrap(), json!({ "instances": [] }));
    }
}
