//! Automation backend port.

use std::collections::HashMap;

use async_trait::async_trait;
use opsbridge_domain::automation::{
    CommandInvocation, CommandTarget, DocumentParameters, NewPatchBaseline, PatchBaselineDetail,
    PatchBaselineIdentity, PatchBaselineUpdate,
};
use opsbridge_domain::backend::BackendResult;

/// Port for the command-document and patch-baseline collaborator.
#[async_trait]
pub trait AutomationBackend: Send + Sync {
    /// Declared parameters of a command document.
    async fn describe_document(&self, name: &str) -> BackendResult<DocumentParameters>;

    /// Dispatch a document against targets; returns the command id.
    async fn send_command(
        &self,
        document_name: &str,
        parameters: &HashMap<String, Vec<String>>,
        targets: &[CommandTarget],
    ) -> BackendResult<String>;

    /// Per-instance invocations recorded for a command id. An unknown id
    /// yields an empty list, not an error.
    async fn list_command_invocations(
        &self,
        command_id: &str,
    ) -> BackendResult<Vec<CommandInvocation>>;

    /// Registered patch baselines.
    async fn list_patch_baselines(&self) -> BackendResult<Vec<PatchBaselineIdentity>>;

    /// Create a baseline; returns its id.
    async fn create_patch_baseline(&self, baseline: &NewPatchBaseline) -> BackendResult<String>;

    /// Full description of one baseline.
    async fn get_patch_baseline(&self, baseline_id: &str) -> BackendResult<PatchBaselineDetail>;

    /// Apply an update; returns the id of the updated baseline.
    async fn update_patch_baseline(&self, update: &PatchBaselineUpdate) -> BackendResult<String>;

    /// Attach a patch group to a baseline.
    async fn register_patch_group(
        &self,
        baseline_id: &str,
        patch_group: &str,
    ) -> BackendResult<()>;
}
