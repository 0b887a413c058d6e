//! Automation action group: command documents and patch baselines.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use opsbridge_domain::automation::{
    AutomationRoute, CreatePatchBaselineRequest, ExecuteDocumentRequest, NewPatchBaseline,
    PatchBaselineUpdate, RegisterPatchGroupRequest, UpdatePatchBaselineRequest,
};
use opsbridge_domain::dispatch::{DispatchError, RawArgument};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::ActionGroupHandler;
use crate::ports::automation_backend::AutomationBackend;

/// Defaults applied when a baseline creation omits optional fields.
#[derive(Debug, Clone)]
pub struct AutomationSettings {
    pub default_operating_system: String,
    pub default_compliance_level: String,
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            default_operating_system: "AMAZON_LINUX_2".to_string(),
            default_compliance_level: "CRITICAL".to_string(),
        }
    }
}

/// Handler for the automation action group.
pub struct AutomationActionGroup {
    backend: Arc<dyn AutomationBackend>,
    settings: AutomationSettings,
}

impl AutomationActionGroup {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self {
            backend,
            settings: AutomationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: AutomationSettings) -> Self {
        self.settings = settings;
        self
    }

    async fn document_parameters(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let name = argument.as_str();
        match self.backend.describe_document(name).await {
            Ok(parameters) => Ok(json!({ "document_name": name, "parameters": parameters })),
            Err(error) => {
                debug!(code = %error.code, document = name, "document lookup failed");
                Ok(json!({ "message": format!("No parameters found for document '{name}'") }))
            }
        }
    }

    async fn execute_document(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let request: ExecuteDocumentRequest = argument.decode()?;
        let Some((name, parameters, targets)) = request.complete() else {
            return Ok(json!({
                "message": "Missing required fields: document_name, parameters, or targets"
            }));
        };

        // The document decides which parameters are legal; validate before
        // dispatching anything.
        let declared = match self.backend.describe_document(name).await {
            Ok(declared) => declared,
            Err(error) => {
                warn!(code = %error.code, document = name, "document lookup failed");
                return Ok(json!({
                    "message": format!("Unable to fetch parameters for document '{name}'")
                }));
            }
        };

        let missing: Vec<&String> = declared
            .required
            .iter()
            .filter(|p| !parameters.contains_key(*p))
            .collect();
        if !missing.is_empty() {
            return Ok(json!({
                "message": format!("Missing required parameters for document '{name}': {missing:?}")
            }));
        }

        // Unknown parameters are dropped rather than rejected.
        let accepted: HashMap<String, Vec<String>> = parameters
            .iter()
            .filter(|(key, _)| declared.declares(key))
            .map(|(key, values)| (key.clone(), values.clone()))
            .collect();

        match self.backend.send_command(name, &accepted, targets).await {
            Ok(command_id) => {
                info!(document = name, command_id = %command_id, "command dispatched");
                Ok(json!({
                    "message": format!(
                        "Successfully triggered SSM document '{name}'. Command ID: {command_id}."
                    )
                }))
            }
            Err(error) => Ok(json!({
                "message": format!("Failed to execute document '{name}': {}", error.message)
            })),
        }
    }

    async fn command_status(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let command_id = argument.as_str();
        match self.backend.list_command_invocations(command_id).await {
            Ok(invocations) => match invocations.first() {
                Some(invocation) => {
                    let instance_id = invocation.instance_id.as_deref().unwrap_or("N/A");
                    Ok(json!({
                        "message": format!(
                            "Command ID {command_id} on instance {instance_id} has status: {}.",
                            invocation.status
                        )
                    }))
                }
                None => Ok(json!({
                    "message": format!("No status found for Command ID: {command_id}")
                })),
            },
            Err(error) => Ok(json!({
                "message": format!("Failed to retrieve command status: {}", error.message)
            })),
        }
    }

    async fn list_patch_baselines(&self) -> Result<Value, DispatchError> {
        match self.backend.list_patch_baselines().await {
            Ok(baselines) => Ok(json!({ "patch_baselines": baselines })),
            Err(error) => Ok(json!({
                "message": format!("Error listing patch baselines: {}", error.message)
            })),
        }
    }

    async fn create_patch_baseline(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let request: CreatePatchBaselineRequest = argument.decode()?;
        let Some(name) = request.name.filter(|n| !n.is_empty()) else {
            return Ok(json!({ "message": "Missing required field: name" }));
        };

        let baseline = NewPatchBaseline {
            name,
            operating_system: request
                .operating_system
                .unwrap_or_else(|| self.settings.default_operating_system.clone()),
            description: request.description.unwrap_or_default(),
            compliance_level: request
                .compliance_level
                .unwrap_or_else(|| self.settings.default_compliance_level.clone()),
            approval_rules: request.approval_rules,
        };

        match self.backend.create_patch_baseline(&baseline).await {
            Ok(baseline_id) => Ok(json!({
                "message": format!("Created patch baseline: {baseline_id}")
            })),
            Err(error) => Ok(json!({
                "message": format!("Error creating patch baseline: {}", error.message)
            })),
        }
    }

    async fn describe_patch_baseline(
        &self,
        argument: &RawArgument,
    ) -> Result<Value, DispatchError> {
        let baseline_id = argument.as_str();
        match self.backend.get_patch_baseline(baseline_id).await {
            Ok(baseline) => Ok(json!({ "patch_baseline": baseline })),
            Err(error) => Ok(json!({
                "message": format!("Error describing patch baseline: {}", error.message)
            })),
        }
    }

    async fn update_patch_baseline(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let request: UpdatePatchBaselineRequest = argument.decode()?;
        let Some(baseline_id) = request.baseline_id.filter(|id| !id.is_empty()) else {
            return Ok(json!({ "message": "Missing required field: baseline_id" }));
        };

        let update = PatchBaselineUpdate {
            baseline_id,
            name: request.name,
            description: request.description,
            approval_rules: request.approval_rules,
        };

        match self.backend.update_patch_baseline(&update).await {
            Ok(baseline_id) => Ok(json!({
                "message": format!("Updated patch baseline: {baseline_id}")
            })),
            Err(error) => Ok(json!({
                "message": format!("Error updating patch baseline: {}", error.message)
            })),
        }
    }

    async fn register_patch_group(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let request: RegisterPatchGroupRequest = argument.decode()?;
        let baseline_id = request.baseline_id.filter(|id| !id.is_empty());
        let patch_group = request.patch_group.filter(|pg| !pg.is_empty());
        let (Some(baseline_id), Some(patch_group)) = (baseline_id, patch_group) else {
            return Ok(json!({
                "message": "Missing required fields: baseline_id or patch_group"
            }));
        };

        match self
            .backend
            .register_patch_group(&baseline_id, &patch_group)
            .await
        {
            Ok(()) => Ok(json!({
                "message": format!("Patch group '{patch_group}' registered with baseline '{baseline_id}'")
            })),
            Err(error) => Ok(json!({
                "message": format!("Error registering patch group: {}", error.message)
            })),
        }
    }
}

#[async_trait]
impl ActionGroupHandler for AutomationActionGroup {
    fn api_paths(&self) -> Vec<&'static str> {
        AutomationRoute::ALL.iter().map(|r| r.as_path()).collect()
    }

    async fn dispatch(
        &self,
        api_path: &str,
        argument: &RawArgument,
    ) -> Result<Value, DispatchError> {
        let Some(route) = AutomationRoute::from_path(api_path) else {
            return Err(DispatchError::UnknownApiPath(api_path.to_string()));
        };
        debug!(path = api_path, "dispatching automation operation");

        match route {
            AutomationRoute::DocumentParameters => self.document_parameters(argument).await,
            AutomationRoute::ExecuteDocument => self.execute_document(argument).await,
            AutomationRoute::CommandStatus => self.command_status(argument).await,
            AutomationRoute::ListPatchBaselines => self.list_patch_baselines().await,
            AutomationRoute::CreatePatchBaseline => self.create_patch_baseline(argument).await,
            AutomationRoute::DescribePatchBaseline => self.describe_patch_baseline(argument).await,
            AutomationRoute::UpdatePatchBaseline => self.update_patch_baseline(argument).await,
            AutomationRoute::RegisterPatchGroup => self.register_patch_group(argument).await,
        }
    }
}
