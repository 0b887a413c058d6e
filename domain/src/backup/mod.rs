//! Backup action group: plans, resource assignments, and jobs.

pub mod records;
pub mod requests;
pub mod routes;

pub use records::{
    BackupJobPage, BackupJobSummary, BackupPlanDetail, BackupPlanDocument, BackupPlanPage,
    BackupPlanSummary, BackupRule, BackupSelectionInput, CreatedBackupPlan,
    CreatedBackupSelection,
};
pub use requests::{
    AssignResourceRequest, BackupLifecycle, BackupRuleInput, CreateBackupPlanRequest,
};
pub use routes::BackupRoute;
