//! Seeded in-memory automation backend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use opsbridge_application::AutomationBackend;
use opsbridge_domain::automation::{
    CommandInvocation, CommandTarget, DocumentParameters, NewPatchBaseline, PatchBaselineDetail,
    PatchBaselineIdentity, PatchBaselineUpdate,
};
use opsbridge_domain::backend::{BackendError, BackendResult};
use serde_json::Value;

struct BaselineRecord {
    baseline_id: String,
    name: String,
    operating_system: String,
    description: String,
    approval_rules: Option<Value>,
}

/// Automation fixture with a small document catalog and baseline store.
///
/// Dispatched commands are remembered so their invocations can be listed
/// afterwards. Unknown command ids list as empty, matching the port
/// contract.
pub struct InMemoryAutomationBackend {
    documents: HashMap<String, DocumentParameters>,
    commands: Mutex<HashMap<String, Vec<CommandInvocation>>>,
    baselines: Mutex<Vec<BaselineRecord>>,
    next_id: AtomicU64,
}

impl InMemoryAutomationBackend {
    pub fn new() -> Self {
        let mut documents = HashMap::new();
        documents.insert(
            "AWS-RunShellScript".to_string(),
            DocumentParameters {
                required: vec!["commands".to_string()],
                optional: vec!["workingDirectory".to_string(), "executionTimeout".to_string()],
            },
        );
        documents.insert(
            "AWS-RunPatchBaseline".to_string(),
            DocumentParameters {
                required: vec!["Operation".to_string()],
                optional: vec!["RebootOption".to_string()],
            },
        );

        let baselines = vec![BaselineRecord {
            baseline_id: "pb-0123456789abcdef0".to_string(),
            name: "prod-amazon-linux".to_string(),
            operating_system: "AMAZON_LINUX_2".to_string(),
            description: "Critical and security updates for production".to_string(),
            approval_rules: None,
        }];

        Self {
            documents,
            commands: Mutex::new(HashMap::new()),
            baselines: Mutex::new(baselines),
            next_id: AtomicU64::new(1),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{n:016x}")
    }
}

impl Default for InMemoryAutomationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AutomationBackend for InMemoryAutomationBackend {
    async fn describe_document(&self, name: &str) -> BackendResult<DocumentParameters> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::not_found(format!("document {name}")))
    }

    async fn send_command(
        &self,
        document_name: &str,
        _parameters: &HashMap<String, Vec<String>>,
        targets: &[CommandTarget],
    ) -> BackendResult<String> {
        if !self.documents.contains_key(document_name) {
            return Err(BackendError::not_found(format!("document {document_name}")));
        }

        let command_id = self.next_id("cmd");
        let invocations: Vec<CommandInvocation> = targets
            .iter()
            .flat_map(|target| {
                if target.key == "InstanceIds" {
                    target
                        .values
                        .iter()
                        .map(|id| CommandInvocation {
                            instance_id: Some(id.clone()),
                            status: "Pending".to_string(),
                        })
                        .collect()
                } else {
                    vec![CommandInvocation {
                        instance_id: None,
                        status: "Pending".to_string(),
                    }]
                }
            })
            .collect();

        let mut commands = self.commands.lock().map_err(poisoned)?;
        commands.insert(command_id.clone(), invocations);
        Ok(command_id)
    }

    async fn list_command_invocations(
        &self,
        command_id: &str,
    ) -> BackendResult<Vec<CommandInvocation>> {
        let commands = self.commands.lock().map_err(poisoned)?;
        Ok(commands.get(command_id).cloned().unwrap_or_default())
    }

    async fn list_patch_baselines(&self) -> BackendResult<Vec<PatchBaselineIdentity>> {
        let baselines = self.baselines.lock().map_err(poisoned)?;
        Ok(baselines
            .iter()
            .map(|record| PatchBaselineIdentity {
                baseline_id: record.baseline_id.clone(),
                baseline_name: Some(record.name.clone()),
                operating_system: Some(record.operating_system.clone()),
                description: Some(record.description.clone()),
            })
            .collect())
    }

    async fn create_patch_baseline(&self, baseline: &NewPatchBaseline) -> BackendResult<String> {
        let baseline_id = self.next_id("pb");
        let mut baselines = self.baselines.lock().map_err(poisoned)?;
        baselines.push(BaselineRecord {
            baseline_id: baseline_id.clone(),
            name: baseline.name.clone(),
            operating_system: baseline.operating_system.clone(),
            description: baseline.description.clone(),
            approval_rules: baseline.approval_rules.clone(),
        });
        Ok(baseline_id)
    }

    async fn get_patch_baseline(&self, baseline_id: &str) -> BackendResult<PatchBaselineDetail> {
        let baselines = self.baselines.lock().map_err(poisoned)?;
        let record = baselines
            .iter()
            .find(|record| record.baseline_id == baseline_id)
            .ok_or_else(|| BackendError::not_found(format!("baseline {baseline_id}")))?;
        Ok(PatchBaselineDetail {
            baseline_id: record.baseline_id.clone(),
            name: Some(record.name.clone()),
            operating_system: Some(record.operating_system.clone()),
            description: Some(record.description.clone()),
            approval_rules: record.approval_rules.clone(),
            created_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap()),
            modified_date: None,
        })
    }

    async fn update_patch_baseline(&self, update: &PatchBaselineUpdate) -> BackendResult<String> {
        let mut baselines = self.baselines.lock().map_err(poisoned)?;
        let record = baselines
            .iter_mut()
            .find(|record| record.baseline_id == update.baseline_id)
            .ok_or_else(|| BackendError::not_found(format!("baseline {}", update.baseline_id)))?;
        if let Some(name) = &update.name {
            record.name = name.clone();
        }
        if let Some(description) = &update.description {
            record.description = description.clone();
        }
        if update.approval_rules.is_some() {
            record.approval_rules = update.approval_rules.clone();
        }
        Ok(record.baseline_id.clone())
    }

    async fn register_patch_group(
        &self,
        baseline_id: &str,
        _patch_group: &str,
    ) -> BackendResult<()> {
        let baselines = self.baselines.lock().map_err(poisoned)?;
        if baselines.iter().any(|record| record.baseline_id == baseline_id) {
            Ok(())
        } else {
            Err(BackendError::not_found(format!("baseline {baseline_id}")))
        }
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> BackendError {
    BackendError::new("InternalError", "fixture state poisoned")
}
