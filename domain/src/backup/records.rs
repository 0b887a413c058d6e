//! Result records and backend-facing shapes for backup operations.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::requests::BackupLifecycle;
use crate::time::{serialize_opt_timestamp, serialize_timestamp};

/// Plan row for listings. Listings serialize as a bare array of these.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BackupPlanSummary {
    pub backup_plan_id: String,
    pub backup_plan_name: String,
    #[serde(
        serialize_with = "serialize_opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(
        serialize_with = "serialize_opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub deletion_date: Option<DateTime<Utc>>,
    #[serde(
        serialize_with = "serialize_opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_execution_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// One page of a plan listing.
#[derive(Debug, Clone, Default)]
pub struct BackupPlanPage {
    pub plans: Vec<BackupPlanSummary>,
    pub next_token: Option<String>,
}

/// Plan document: the shape sent on creation and embedded in descriptions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BackupPlanDocument {
    pub backup_plan_name: String,
    pub rules: Vec<BackupRule>,
}

/// Backend-facing schedule rule, vault default already applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BackupRule {
    pub rule_name: String,
    pub target_backup_vault_name: String,
    pub schedule_expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<BackupLifecycle>,
}

/// Acknowledgement returned by plan creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatedBackupPlan {
    pub backup_plan_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_plan_arn: Option<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub creation_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// Full description of one plan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BackupPlanDetail {
    pub backup_plan_id: String,
    pub backup_plan: BackupPlanDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(
        serialize_with = "serialize_opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<DateTime<Utc>>,
}

/// Backend-facing selection payload composed for resource assignment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BackupSelectionInput {
    pub selection_name: String,
    pub iam_role_arn: String,
    pub resources: Vec<String>,
}

/// Acknowledgement returned by selection creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatedBackupSelection {
    pub selection_id: String,
    pub backup_plan_id: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub creation_date: DateTime<Utc>,
}

/// Job row for listings. Listings serialize as a bare array of these.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BackupJobSummary {
    pub backup_job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_vault_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_done: Option<String>,
    #[serde(
        serialize_with = "serialize_opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(
        serialize_with = "serialize_opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(
        serialize_with = "serialize_opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_by: Option<DateTime<Utc>>,
}

/// One page of a job listing.
#[derive(Debug, Clone, Default)]
pub struct BackupJobPage {
    pub jobs: Vec<BackupJobSummary>,
    pub next_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    #[test]
    fn plan_summary_normalizes_dates_and_skips_absent_ones() {
        let summary = BackupPlanSummary {
            backup_plan_id: "plan-1".to_string(),
            backup_plan_name: "daily".to_string(),
            creation_date: Some(Utc.with_ymd_and_hms(2024, 3, 10, 4, 0, 0).unwrap()),
            deletion_date: None,
            last_execution_date: None,
            version_id: Some("v1".to_string()),
        };

        let wire: Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(wire["CreationDate"], "2024-03-10T04:00:00Z");
        assert!(wire.get("DeletionDate").is_none());
        assert!(wire.get("LastExecutionDate").is_none());
    }

    #[test]
    fn plan_document_nests_rules_in_backend_casing() {
        let document = BackupPlanDocument {
            backup_plan_name: "daily".to_string(),
            rules: vec![BackupRule {
                rule_name: "nightly".to_string(),
                target_backup_vault_name: "Default".to_string(),
                schedule_expression: "cron(0 5 * * ? *)".to_string(),
                lifecycle: None,
            }],
        };

        let wire: Value = serde_json::to_value(&document).unwrap();
        assert_eq!(wire["BackupPlanName"], "daily");
        assert_eq!(wire["Rules"][0]["RuleName"], "nightly");
        assert_eq!(wire["Rules"][0]["TargetBackupVaultName"], "Default");
        assert!(wire["Rules"][0].get("Lifecycle").is_none());
    }
}
