//! Backup action group: plans, resource assignments, and jobs.

use std::sync::Arc;

use async_trait::async_trait;
use opsbridge_domain::backend::BackendError;
use opsbridge_domain::backup::{
    AssignResourceRequest, BackupPlanDocument, BackupRoute, BackupRule, BackupSelectionInput,
    CreateBackupPlanRequest,
};
use opsbridge_domain::dispatch::{DispatchError, RawArgument};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::ActionGroupHandler;
use crate::ports::backup_backend::BackupBackend;

/// Defaults applied when a plan rule omits optional fields.
#[derive(Debug, Clone)]
pub struct BackupSettings {
    pub default_vault_name: String,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            default_vault_name: "Default".to_string(),
        }
    }
}

/// Handler for the backup action group.
pub struct BackupActionGroup {
    backend: Arc<dyn BackupBackend>,
    settings: BackupSettings,
}

impl BackupActionGroup {
    pub fn new(backend: Arc<dyn BackupBackend>) -> Self {
        Self {
            backend,
            settings: BackupSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: BackupSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Listings serialize as a bare array spanning every page.
    async fn list_plans(&self) -> Result<Value, DispatchError> {
        let mut plans = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            match self.backend.list_backup_plans(next_token.as_deref()).await {
                Ok(page) => {
                    plans.extend(page.plans);
                    match page.next_token {
                        Some(token) => next_token = Some(token),
                        None => break,
                    }
                }
                Err(error) => return Ok(Self::backend_error(&error)),
            }
        }
        Ok(serde_json::to_value(&plans)?)
    }

    async fn create_plan(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let request: CreateBackupPlanRequest = argument.decode()?;
        let plan_name = request.plan_name.filter(|n| !n.is_empty());
        let rule_inputs = request.rules.filter(|r| !r.is_empty());
        let (Some(plan_name), Some(rule_inputs)) = (plan_name, rule_inputs) else {
            return Ok(json!({ "error": "Missing required fields: plan_name or rules" }));
        };

        let mut rules = Vec::with_capacity(rule_inputs.len());
        for rule in rule_inputs {
            let rule_name = rule.rule_name.filter(|n| !n.is_empty());
            let schedule = rule.schedule.filter(|s| !s.is_empty());
            let (Some(rule_name), Some(schedule)) = (rule_name, schedule) else {
                return Ok(json!({
                    "error": "Missing required fields: rule_name or schedule in rule"
                }));
            };
            rules.push(BackupRule {
                rule_name,
                target_backup_vault_name: rule
                    .vault_name
                    .unwrap_or_else(|| self.settings.default_vault_name.clone()),
                schedule_expression: schedule,
                lifecycle: rule.lifecycle,
            });
        }

        let plan = BackupPlanDocument {
            backup_plan_name: plan_name,
            rules,
        };

        match self.backend.create_backup_plan(&plan).await {
            Ok(created) => {
                info!(plan_id = %created.backup_plan_id, "backup plan created");
                Ok(serde_json::to_value(&created)?)
            }
            Err(error) => Ok(Self::backend_error(&error)),
        }
    }

    async fn describe_plan(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        match self.backend.get_backup_plan(argument.as_str()).await {
            Ok(detail) => Ok(serde_json::to_value(&detail)?),
            Err(error) => Ok(Self::backend_error(&error)),
        }
    }

    async fn delete_plan(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let plan_id = argument.as_str();
        match self.backend.delete_backup_plan(plan_id).await {
            Ok(()) => Ok(Self::deleted()),
            // Deleting an absent plan reaches the same end state.
            Err(error) if error.is_not_found() => {
                debug!(plan_id, "plan already absent on delete");
                Ok(Self::deleted())
            }
            Err(error) => Ok(Self::backend_error(&error)),
        }
    }

    async fn assign_resource(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let request: AssignResourceRequest = argument.decode()?;
        let plan_id = request.plan_id.filter(|p| !p.is_empty());
        let iam_role_arn = request.iam_role_arn.filter(|a| !a.is_empty());
        let resource_arn = request.resource_arn.filter(|a| !a.is_empty());
        let (Some(plan_id), Some(iam_role_arn), Some(resource_arn)) =
            (plan_id, iam_role_arn, resource_arn)
        else {
            return Ok(json!({
                "error": "Missing required fields: plan_id, iam_role_arn, or resource_arn"
            }));
        };

        let selection = BackupSelectionInput {
            selection_name: format!("selection-{plan_id}"),
            iam_role_arn,
            resources: vec![resource_arn],
        };

        match self.backend.create_backup_selection(&plan_id, &selection).await {
            Ok(created) => Ok(serde_json::to_value(&created)?),
            Err(error) => Ok(Self::backend_error(&error)),
        }
    }

    async fn list_jobs(&self) -> Result<Value, DispatchError> {
        let mut jobs = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            match self.backend.list_backup_jobs(next_token.as_deref()).await {
                Ok(page) => {
                    jobs.extend(page.jobs);
                    match page.next_token {
                        Some(token) => next_token = Some(token),
                        None => break,
                    }
                }
                Err(error) => return Ok(Self::backend_error(&error)),
            }
        }
        Ok(serde_json::to_value(&jobs)?)
    }

    fn deleted() -> Value {
        json!({ "message": "Backup plan deleted successfully." })
    }

    fn backend_error(error: &BackendError) -> Value {
        warn!(code = %error.code, "backup backend call failed");
        json!({ "error": error.message })
    }
}

#[async_trait]
impl ActionGroupHandler for BackupActionGroup {
    fn api_paths(&self) -> Vec<&'static str> {
        BackupRoute::ALL.iter().map(|r| r.as_path()).collect()
    }

    async fn dispatch(
        &self,
        api_path: &str,
        argument: &RawArgument,
    ) -> Result<Value, DispatchError> {
        let Some(route) = BackupRoute::from_path(api_path) else {
            return Err(DispatchError::UnknownApiPath(api_path.to_string()));
        };
        debug!(path = api_path, "dispatching backup operation");

        match route {
            BackupRoute::ListPlans => self.list_plans().await,
            BackupRoute::CreatePlan => self.create_plan(argument).await,
            BackupRoute::DescribePlan => self.describe_plan(argument).await,
            BackupRoute::DeletePlan => self.delete_plan(argument).await,
            BackupRoute::AssignResource => self.assign_resource(argument).await,
            BackupRoute::ListJobs => self.list_jobs().await,
        }
    }
}
