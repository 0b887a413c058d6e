//! Backup backend port.

use async_trait::async_trait;
use opsbridge_domain::backend::BackendResult;
use opsbridge_domain::backup::{
    BackupJobPage, BackupPlanDetail, BackupPlanDocument, BackupPlanPage, BackupSelectionInput,
    CreatedBackupPlan, CreatedBackupSelection,
};

/// Port for the backup-plan collaborator.
///
/// The two listings page: callers pass the previous page's token until the
/// backend stops returning one.
#[async_trait]
pub trait BackupBackend: Send + Sync {
    /// One page of backup plans.
    async fn list_backup_plans(&self, next_token: Option<&str>) -> BackendResult<BackupPlanPage>;

    /// Create a plan from its document.
    async fn create_backup_plan(
        &self,
        plan: &BackupPlanDocument,
    ) -> BackendResult<CreatedBackupPlan>;

    /// Full description of one plan.
    async fn get_backup_plan(&self, plan_id: &str) -> BackendResult<BackupPlanDetail>;

    /// Delete a plan. Deleting an absent plan reports
    /// [`ResourceNotFoundException`](opsbridge_domain::backend::codes::RESOURCE_NOT_FOUND).
    async fn delete_backup_plan(&self, plan_id: &str) -> BackendResult<()>;

    /// Create a selection attaching resources to a plan.
    async fn create_backup_selection(
        &self,
        plan_id: &str,
        selection: &BackupSelectionInput,
    ) -> BackendResult<CreatedBackupSelection>;

    /// One page of backup jobs.
    async fn list_backup_jobs(&self, next_token: Option<&str>) -> BackendResult<BackupJobPage>;
}
