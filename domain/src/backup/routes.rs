//! Closed route set for the backup action group.

/// Operations exposed by the backup action group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupRoute {
    /// All backup plans, across every page.
    ListPlans,
    /// Create a plan from named rules.
    CreatePlan,
    /// Full description of one plan.
    DescribePlan,
    /// Delete a plan; repeat deletes are tolerated.
    DeletePlan,
    /// Assign a resource to a plan via a fresh selection.
    AssignResource,
    /// All backup jobs, across every page.
    ListJobs,
}

impl BackupRoute {
    /// Every registered route, in catalogue order.
    pub const ALL: [BackupRoute; 6] = [
        BackupRoute::ListPlans,
        BackupRoute::CreatePlan,
        BackupRoute::DescribePlan,
        BackupRoute::DeletePlan,
        BackupRoute::AssignResource,
        BackupRoute::ListJobs,
    ];

    /// Exact, case-sensitive lookup including the leading slash.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/list_backup_plans" => Some(BackupRoute::ListPlans),
            "/create_backup_plan" => Some(BackupRoute::CreatePlan),
            "/describe_backup_plan" => Some(BackupRoute::DescribePlan),
            "/delete_backup_plan" => Some(BackupRoute::DeletePlan),
            "/assign_resource_to_backup_plan" => Some(BackupRoute::AssignResource),
            "/list_backup_jobs" => Some(BackupRoute::ListJobs),
            _ => None,
        }
    }

    pub fn as_path(&self) -> &'static str {
        match self {
            BackupRoute::ListPlans => "/list_backup_plans",
            BackupRoute::CreatePlan => "/create_backup_plan",
            BackupRoute::DescribePlan => "/describe_backup_plan",
            BackupRoute::DeletePlan => "/delete_backup_plan",
            BackupRoute::AssignResource => "/assign_resource_to_backup_plan",
            BackupRoute::ListJobs => "/list_backup_jobs",
        }
    }
}
