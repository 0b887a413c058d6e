//! Support action group: case lifecycle.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use opsbridge_domain::dispatch::{DispatchError, RawArgument};
use opsbridge_domain::support::{
    CaseFilters, CreateSupportCaseRequest, NewSupportCase, SupportRoute, UpdateSupportCaseRequest,
};
use opsbridge_domain::time::{format_timestamp, normalize_timestamp};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::ActionGroupHandler;
use crate::ports::support_backend::SupportBackend;

const SUBSCRIPTION_MESSAGE: &str = "Error: You must have a Business, Enterprise On-Ramp, or \
     Enterprise Support plan to use the AWS Support API.";

/// Case classification defaults and the fallback pair used on retry.
#[derive(Debug, Clone)]
pub struct SupportSettings {
    pub default_service_code: String,
    pub default_category_code: String,
    pub default_severity_code: String,
    pub default_language: String,
    pub issue_type: String,
    pub fallback_service_code: String,
    pub fallback_category_code: String,
}

impl Default for SupportSettings {
    fn default() -> Self {
        Self {
            default_service_code: "amazon-bedrock".to_string(),
            default_category_code: "other".to_string(),
            default_severity_code: "low".to_string(),
            default_language: "en".to_string(),
            issue_type: "technical".to_string(),
            fallback_service_code: "general-info".to_string(),
            fallback_category_code: "general-guidance".to_string(),
        }
    }
}

/// Handler for the support action group.
pub struct SupportActionGroup {
    backend: Arc<dyn SupportBackend>,
    settings: SupportSettings,
}

impl SupportActionGroup {
    pub fn new(backend: Arc<dyn SupportBackend>) -> Self {
        Self {
            backend,
            settings: SupportSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: SupportSettings) -> Self {
        self.settings = settings;
        self
    }

    async fn create_case(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let request: CreateSupportCaseRequest = argument.decode()?;
        let subject = request.subject.clone().filter(|s| !s.is_empty());
        let body = request.communication_body.clone().filter(|b| !b.is_empty());
        let (Some(subject), Some(body)) = (subject, body) else {
            return Ok(json!({
                "message": "Missing required parameters: subject and communication_body are required."
            }));
        };

        let communication_body = match request.error_details.as_ref().filter(|d| !d.is_empty()) {
            Some(details) => {
                let now = format_timestamp(&Utc::now());
                let mut enriched = body;
                enriched.push_str(&details.render(request.agent_name.as_deref(), &now));
                enriched
            }
            None => body,
        };

        let case = NewSupportCase {
            subject,
            service_code: request
                .service_code
                .unwrap_or_else(|| self.settings.default_service_code.clone()),
            category_code: request
                .category_code
                .unwrap_or_else(|| self.settings.default_category_code.clone()),
            severity_code: request
                .severity_code
                .unwrap_or_else(|| self.settings.default_severity_code.clone()),
            communication_body,
            cc_email_addresses: request.cc_email_addresses,
            language: request
                .language
                .unwrap_or_else(|| self.settings.default_language.clone()),
            issue_type: self.settings.issue_type.clone(),
        };

        match self.backend.create_case(&case).await {
            Ok(case_id) => {
                info!(case_id = %case_id, "support case created");
                Ok(json!({
                    "case_id": case_id,
                    "message": "Support case created successfully"
                }))
            }
            Err(error) if error.is_subscription_required() => {
                Ok(json!({ "message": SUBSCRIPTION_MESSAGE }))
            }
            // Retry exactly once with the fallback classification.
            Err(error) if error.is_invalid_parameter() => {
                warn!(code = %error.code, "case rejected, retrying with fallback classification");
                let fallback = case.with_classification(
                    &self.settings.fallback_service_code,
                    &self.settings.fallback_category_code,
                );
                match self.backend.create_case(&fallback).await {
                    Ok(case_id) => Ok(json!({
                        "case_id": case_id,
                        "message": "Support case created successfully with fallback service/category"
                    })),
                    Err(inner) => Ok(json!({
                        "message": format!("Error with fallback parameters: {}", inner.message)
                    })),
                }
            }
            Err(error) => Ok(json!({ "message": format!("Error: {}", error.message) })),
        }
    }

    async fn get_cases(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let filters: CaseFilters = argument.decode_or_default()?;

        match self.backend.describe_cases(&filters).await {
            Ok(mut cases) => {
                for case in &mut cases {
                    // Only the most recent communication travels back.
                    case.recent_communications.truncate(1);
                    if let Some(submitted) = &mut case.submitted_time {
                        *submitted = normalize_timestamp(submitted);
                    }
                    for communication in &mut case.recent_communications {
                        if let Some(created) = &mut communication.time_created {
                            *created = normalize_timestamp(created);
                        }
                    }
                }
                Ok(json!({ "cases": cases }))
            }
            Err(error) if error.is_subscription_required() => {
                Ok(json!({ "message": SUBSCRIPTION_MESSAGE }))
            }
            Err(error) => Ok(json!({ "message": format!("Error: {}", error.message) })),
        }
    }

    async fn update_case(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let request: UpdateSupportCaseRequest = argument.decode()?;
        let case_id = request.case_id.filter(|c| !c.is_empty());
        let body = request.communication_body.filter(|b| !b.is_empty());
        let (Some(case_id), Some(body)) = (case_id, body) else {
            return Ok(json!({
                "message": "Missing required parameters: case_id and communication_body are required."
            }));
        };

        match self
            .backend
            .add_communication(&case_id, &body, &request.cc_email_addresses)
            .await
        {
            Ok(true) => Ok(json!({
                "message": "Communication added to case successfully",
                "case_id": case_id
            })),
            Ok(false) => Ok(json!({
                "message": "Failed to add communication to case",
                "case_id": case_id
            })),
            Err(error) if error.is_subscription_required() => {
                Ok(json!({ "message": SUBSCRIPTION_MESSAGE }))
            }
            Err(error) => Ok(json!({ "message": format!("Error: {}", error.message) })),
        }
    }
}

#[async_trait]
impl ActionGroupHandler for SupportActionGroup {
    // The case listing accepts an invocation with no argument at all.
    fn requires_argument(&self) -> bool {
        false
    }

    fn api_paths(&self) -> Vec<&'static str> {
        SupportRoute::ALL.iter().map(|r| r.as_path()).collect()
    }

    async fn dispatch(
        &self,
        api_path: &str,
        argument: &RawArgument,
    ) -> Result<Value, DispatchError> {
        let Some(route) = SupportRoute::from_path(api_path) else {
            return Err(DispatchError::UnknownApiPath(api_path.to_string()));
        };
        debug!(path = api_path, "dispatching support operation");

        match route {
            SupportRoute::CreateCase => self.create_case(argument).await,
            SupportRoute::GetCases => self.get_cases(argument).await,
            SupportRoute::UpdateCase => self.update_case(argument).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsbridge_domain::backend::{BackendError, BackendResult};
    use opsbridge_domain::support::{CaseCommunication, SupportCase};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted backend: pops one outcome per create_case call.
    struct StubSupportBackend {
        create_calls: AtomicUsize,
        create_outcomes: Mutex<Vec<BackendResult<String>>>,
        created: Mutex<Vec<NewSupportCase>>,
        cases: Vec<SupportCase>,
        accept_communication: bool,
    }

    impl StubSupportBackend {
        fn creating(outcomes: Vec<BackendResult<String>>) -> Self {
            Self {
                create_calls: AtomicUsize::new(0),
                create_outcomes: Mutex::new(outcomes),
                created: Mutex::new(Vec::new()),
                cases: Vec::new(),
                accept_communication: true,
            }
        }

        fn listing(cases: Vec<SupportCase>) -> Self {
            Self {
                create_calls: AtomicUsize::new(0),
                create_outcomes: Mutex::new(Vec::new()),
                created: Mutex::new(Vec::new()),
                cases,
                accept_communication: true,
            }
        }
    }

    #[async_trait]
    impl SupportBackend for StubSupportBackend {
        async fn create_case(&self, case: &NewSupportCase) -> BackendResult<String> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.created.lock().unwrap().push(case.clone());
            let mut outcomes = self.create_outcomes.lock().unwrap();
            if outcomes.is_empty() {
                Ok("case-default".to_string())
            } else {
                outcomes.remove(0)
            }
        }

        async fn describe_cases(&self, _filters: &CaseFilters) -> BackendResult<Vec<SupportCase>> {
            Ok(self.cases.clone())
        }

        async fn add_communication(
            &self,
            _case_id: &str,
            _body: &str,
            _cc_email_addresses: &[String],
        ) -> BackendResult<bool> {
            Ok(self.accept_communication)
        }
    }

    fn handler(stub: StubSupportBackend) -> (SupportActionGroup, Arc<StubSupportBackend>) {
        let stub = Arc::new(stub);
        (SupportActionGroup::new(stub.clone()), stub)
    }

    const CREATE: &str = r#"{"subject": "Deploy failed", "communication_body": "Agent run failed"}"#;

    #[tokio::test]
    async fn create_applies_classification_defaults() {
        let (handler, stub) = handler(StubSupportBackend::creating(vec![Ok(
            "case-123".to_string()
        )]));
        let payload = handler
            .dispatch("/create_support_case", &RawArgument::new(CREATE))
            .await
            .unwrap();

        assert_eq!(payload["case_id"], "case-123");
        assert_eq!(payload["message"], "Support case created successfully");

        let created = stub.created.lock().unwrap();
        assert_eq!(created[0].service_code, "amazon-bedrock");
        assert_eq!(created[0].category_code, "other");
        assert_eq!(created[0].severity_code, "low");
        assert_eq!(created[0].language, "en");
        assert_eq!(created[0].issue_type, "technical");
    }

    #[tokio::test]
    async fn create_enriches_the_body_with_error_details() {
        let (handler, stub) = handler(StubSupportBackend::creating(vec![Ok(
            "case-123".to_string()
        )]));
        handler
            .dispatch(
                "/create_support_case",
                &RawArgument::new(
                    r#"{
                        "subject": "Deploy failed",
                        "communication_body": "Agent run failed",
                        "agent_name": "deployer",
                        "error_details": {
                            "error_type": "Timeout",
                            "error_message": "no response after 300s",
                            "timestamp": "2024-05-01T12:00:00Z"
                        }
                    }"#,
                ),
            )
            .await
            .unwrap();

        let created = stub.created.lock().unwrap();
        let body = &created[0].communication_body;
        assert!(body.starts_with("Agent run failed\n\n--- Error Details ---\n"));
        assert!(body.contains("Agent: deployer\n"));
        assert!(body.contains("Error Type: Timeout\n"));
        assert!(body.contains("Timestamp: 2024-05-01T12:00:00Z\n"));
    }

    #[tokio::test]
    async fn invalid_parameters_trigger_exactly_one_fallback_retry() {
        let (handler, stub) = handler(StubSupportBackend::creating(vec![
            Err(BackendError::invalid_parameter("bad service code")),
            Ok("case-456".to_string()),
        ]));
        let payload = handler
            .dispatch("/create_support_case", &RawArgument::new(CREATE))
            .await
            .unwrap();

        assert_eq!(payload["case_id"], "case-456");
        assert_eq!(
            payload["message"],
            "Support case created successfully with fallback service/category"
        );
        assert_eq!(stub.create_calls.load(Ordering::SeqCst), 2);

        let created = stub.created.lock().unwrap();
        assert_eq!(created[1].service_code, "general-info");
        assert_eq!(created[1].category_code, "general-guidance");
        assert_eq!(created[1].subject, created[0].subject);
    }

    #[tokio::test]
    async fn failed_fallback_is_reported_without_further_retries() {
        let (handler, stub) = handler(StubSupportBackend::creating(vec![
            Err(BackendError::invalid_parameter("bad service code")),
            Err(BackendError::invalid_parameter("still bad")),
        ]));
        let payload = handler
            .dispatch("/create_support_case", &RawArgument::new(CREATE))
            .await
            .unwrap();

        assert_eq!(payload["message"], "Error with fallback parameters: still bad");
        assert_eq!(stub.create_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn subscription_errors_do_not_retry() {
        let (handler, stub) = handler(StubSupportBackend::creating(vec![Err(
            BackendError::subscription_required(),
        )]));
        let payload = handler
            .dispatch("/create_support_case", &RawArgument::new(CREATE))
            .await
            .unwrap();

        assert_eq!(payload["message"], SUBSCRIPTION_MESSAGE);
        assert_eq!(stub.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn create_requires_subject_and_body() {
        let (handler, stub) = handler(StubSupportBackend::creating(Vec::new()));
        let payload = handler
            .dispatch(
                "/create_support_case",
                &RawArgument::new(r#"{"subject": "Deploy failed"}"#),
            )
            .await
            .unwrap();

        assert_eq!(
            payload["message"],
            "Missing required parameters: subject and communication_body are required."
        );
        assert_eq!(stub.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn listing_truncates_communications_and_normalizes_times() {
        let case = SupportCase {
            case_id: "case-1".to_string(),
            subject: Some("s".to_string()),
            status: Some("opened".to_string()),
            service_code: Some("amazon-bedrock".to_string()),
            category_code: Some("other".to_string()),
            severity_code: Some("low".to_string()),
            submitted_time: Some("2024-05-01T14:30:45.123456+02:00".to_string()),
            recent_communications: vec![
                CaseCommunication {
                    body: Some("latest".to_string()),
                    submitted_by: Some("ops@example.com".to_string()),
                    time_created: Some("2024-05-02T09:00:00.5+00:00".to_string()),
                },
                CaseCommunication {
                    body: Some("older".to_string()),
                    submitted_by: None,
                    time_created: None,
                },
            ],
        };
        let (handler, _) = handler(StubSupportBackend::listing(vec![case]));

        let payload = handler
            .dispatch("/get_support_cases", &RawArgument::default())
            .await
            .unwrap();

        let cases = payload["cases"].as_array().unwrap();
        assert_eq!(cases[0]["submitted_time"], "2024-05-01T12:30:45Z");
        let communications = cases[0]["recent_communications"].as_array().unwrap();
        assert_eq!(communications.len(), 1);
        assert_eq!(communications[0]["body"], "latest");
        assert_eq!(communications[0]["timeCreated"], "2024-05-02T09:00:00Z");
    }

    #[tokio::test]
    async fn listing_accepts_an_empty_argument() {
        let (handler, _) = handler(StubSupportBackend::listing(Vec::new()));
        let payload = handler
            .dispatch("/get_support_cases", &RawArgument::default())
            .await
            .unwrap();

        assert_eq!(payload["cases"], json!([]));
    }

    #[tokio::test]
    async fn update_reports_backend_acceptance() {
        let (handler, _) = handler(StubSupportBackend::listing(Vec::new()));
        let payload = handler
            .dispatch(
                "/update_support_case",
                &RawArgument::new(r#"{"case_id": "case-1", "communication_body": "update"}"#),
            )
            .await
            .unwrap();

        assert_eq!(payload["message"], "Communication added to case successfully");
        assert_eq!(payload["case_id"], "case-1");
    }

    #[tokio::test]
    async fn update_reports_backend_rejection() {
        let rejecting = StubSupportBackend {
            accept_communication: false,
            ..StubSupportBackend::listing(Vec::new())
        };
        let (handler, _) = handler(rejecting);
        let payload = handler
            .dispatch(
                "/update_support_case",
                &RawArgument::new(r#"{"case_id": "case-9", "communication_body": "update"}"#),
            )
            .await
            .unwrap();

        assert_eq!(payload["message"], "Failed to add communication to case");
        assert_eq!(payload["case_id"], "case-9");
    }

    #[tokio::test]
    async fn update_requires_case_id_and_body() {
        let (handler, _) = handler(StubSupportBackend::listing(Vec::new()));
        let payload = handler
            .dispatch(
                "/update_support_case",
                &RawArgument::new(r#"{"communication_body": "update"}"#),
            )
            .await
            .unwrap();

        assert_eq!(
            payload["message"],
            "Missing required parameters: case_id and communication_body are required."
        );
    }

    #[tokio::test]
    async fn unknown_path_is_rejected() {
        let (handler, _) = handler(StubSupportBackend::listing(Vec::new()));
        let error = handler
            .dispatch("/close_support_case", &RawArgument::default())
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "/close_support_case is not a valid API path."
        );
    }
}
