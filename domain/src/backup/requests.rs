//! Typed argument schemas for backup operations.

use serde::{Deserialize, Serialize};

/// Argument for `/create_backup_plan`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBackupPlanRequest {
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub rules: Option<Vec<BackupRuleInput>>,
}

/// One schedule rule inside a plan creation request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackupRuleInput {
    #[serde(default)]
    pub rule_name: Option<String>,
    /// Target vault; the handler's default vault applies when absent.
    #[serde(default)]
    pub vault_name: Option<String>,
    /// Cron or rate expression.
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub lifecycle: Option<BackupLifecycle>,
}

/// Retention settings passed through to the backup API unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BackupLifecycle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_to_cold_storage_after_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_after_days: Option<i64>,
}

/// Argument for `/assign_resource_to_backup_plan`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignResourceRequest {
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub iam_role_arn: Option<String>,
    #[serde(default)]
    pub resource_arn: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_request_decodes_rules_with_lifecycle() {
        let request: CreateBackupPlanRequest = serde_json::from_str(
            r#"{
                "plan_name": "daily",
                "rules": [{
                    "rule_name": "nightly",
                    "schedule": "cron(0 5 * * ? *)",
                    "lifecycle": {"DeleteAfterDays": 30}
                }]
            }"#,
        )
        .unwrap();

        let rules = request.rules.unwrap();
        assert_eq!(rules[0].rule_name.as_deref(), Some("nightly"));
        assert_eq!(rules[0].vault_name, None);
        assert_eq!(
            rules[0].lifecycle.as_ref().unwrap().delete_after_days,
            Some(30)
        );
    }

    #[test]
    fn lifecycle_round_trips_in_backend_casing() {
        let lifecycle = BackupLifecycle {
            move_to_cold_storage_after_days: Some(7),
            delete_after_days: Some(90),
        };
        let wire = serde_json::to_value(&lifecycle).unwrap();
        assert_eq!(wire["MoveToColdStorageAfterDays"], 7);
        assert_eq!(wire["DeleteAfterDays"], 90);

        let back: BackupLifecycle = serde_json::from_value(wire).unwrap();
        assert_eq!(back, lifecycle);
    }

    #[test]
    fn assignment_fields_all_default_to_none() {
        let request: AssignResourceRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.plan_id, None);
        assert_eq!(request.iam_role_arn, None);
        assert_eq!(request.resource_arn, None);
    }
}
