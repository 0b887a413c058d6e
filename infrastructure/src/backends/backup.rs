//! Seeded in-memory backup backend.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use opsbridge_application::BackupBackend;
use opsbridge_domain::backend::{BackendError, BackendResult};
use opsbridge_domain::backup::{
    BackupJobPage, BackupJobSummary, BackupPlanDetail, BackupPlanDocument, BackupPlanPage,
    BackupPlanSummary, BackupRule, BackupSelectionInput, CreatedBackupPlan,
    CreatedBackupSelection,
};

/// Listings return at most this many rows per page, so the seeded data
/// exercises the callers' token loops.
const PAGE_SIZE: usize = 2;

struct PlanRecord {
    backup_plan_id: String,
    document: BackupPlanDocument,
    creation_date: DateTime<Utc>,
    version_id: String,
}

/// Backup fixture over seeded plans and jobs.
///
/// Deleting an absent plan reports `ResourceNotFoundException`, which lets
/// callers exercise their delete idempotence handling.
pub struct InMemoryBackupBackend {
    plans: Mutex<Vec<PlanRecord>>,
    jobs: Vec<BackupJobSummary>,
    next_id: AtomicU64,
}

impl InMemoryBackupBackend {
    pub fn new() -> Self {
        Self {
            plans: Mutex::new(seed_plans()),
            jobs: seed_jobs(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryBackupBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_plans() -> Vec<PlanRecord> {
    vec![
        PlanRecord {
            backup_plan_id: "plan-daily-0001".to_string(),
            document: BackupPlanDocument {
                backup_plan_name: "daily-production".to_string(),
                rules: vec![BackupRule {
                    rule_name: "nightly".to_string(),
                    target_backup_vault_name: "Default".to_string(),
                    schedule_expression: "cron(0 5 * * ? *)".to_string(),
                    lifecycle: None,
                }],
            },
            creation_date: Utc.with_ymd_and_hms(2024, 3, 10, 4, 0, 0).unwrap(),
            version_id: "v1".to_string(),
        },
        PlanRecord {
            backup_plan_id: "plan-weekly-0002".to_string(),
            document: BackupPlanDocument {
                backup_plan_name: "weekly-archive".to_string(),
                rules: vec![BackupRule {
                    rule_name: "sunday-full".to_string(),
                    target_backup_vault_name: "archive".to_string(),
                    schedule_expression: "cron(0 3 ? * SUN *)".to_string(),
                    lifecycle: None,
                }],
            },
            creation_date: Utc.with_ymd_and_hms(2024, 1, 7, 3, 0, 0).unwrap(),
            version_id: "v1".to_string(),
        },
        PlanRecord {
            backup_plan_id: "plan-dev-0003".to_string(),
            document: BackupPlanDocument {
                backup_plan_name: "dev-snapshots".to_string(),
                rules: vec![BackupRule {
                    rule_name: "hourly".to_string(),
                    target_backup_vault_name: "Default".to_string(),
                    schedule_expression: "cron(0 * * * ? *)".to_string(),
                    lifecycle: None,
                }],
            },
            creation_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            version_id: "v2".to_string(),
        },
    ]
}

fn seed_jobs() -> Vec<BackupJobSummary> {
    vec![
        BackupJobSummary {
            backup_job_id: "job-0001".to_string(),
            backup_vault_name: Some("Default".to_string()),
            resource_arn: Some(
                "arn:aws:ec2:us-east-1:123456789012:instance/i-0a1b2c3d4e5f60001".to_string(),
            ),
            state: Some("COMPLETED".to_string()),
            percent_done: Some("100.0".to_string()),
            creation_date: Some(Utc.with_ymd_and_hms(2024, 6, 3, 5, 0, 0).unwrap()),
            completion_date: Some(Utc.with_ymd_and_hms(2024, 6, 3, 5, 12, 0).unwrap()),
            start_by: None,
        },
        BackupJobSummary {
            backup_job_id: "job-0002".to_string(),
            backup_vault_name: Some("Default".to_string()),
            resource_arn: Some(
                "arn:aws:ec2:us-east-1:123456789012:instance/i-0a1b2c3d4e5f60002".to_string(),
            ),
            state: Some("RUNNING".to_string()),
            percent_done: Some("42.5".to_string()),
            creation_date: Some(Utc.with_ymd_and_hms(2024, 6, 4, 5, 0, 0).unwrap()),
            completion_date: None,
            start_by: Some(Utc.with_ymd_and_hms(2024, 6, 4, 13, 0, 0).unwrap()),
        },
        BackupJobSummary {
            backup_job_id: "job-0003".to_string(),
            backup_vault_name: Some("archive".to_string()),
            resource_arn: None,
            state: Some("FAILED".to_string()),
            percent_done: Some("0.0".to_string()),
            creation_date: Some(Utc.with_ymd_and_hms(2024, 6, 2, 3, 0, 0).unwrap()),
            completion_date: None,
            start_by: None,
        },
    ]
}

/// Parse a listing token back into an offset. Tokens are opaque to
/// callers; here they are just stringified offsets.
fn token_offset(next_token: Option<&str>) -> BackendResult<usize> {
    match next_token {
        None => Ok(0),
        Some(token) => token
            .parse()
            .map_err(|_| BackendError::invalid_parameter(format!("invalid pagination token '{token}'"))),
    }
}

fn page_token(offset: usize, page_len: usize, total: usize) -> Option<String> {
    let consumed = offset + page_len;
    (consumed < total).then(|| consumed.to_string())
}

#[async_trait]
impl BackupBackend for InMemoryBackupBackend {
    async fn list_backup_plans(&self, next_token: Option<&str>) -> BackendResult<BackupPlanPage> {
        let offset = token_offset(next_token)?;
        let plans = self.plans.lock().map_err(poisoned)?;
        let page: Vec<BackupPlanSummary> = plans
            .iter()
            .skip(offset)
            .take(PAGE_SIZE)
            .map(|record| BackupPlanSummary {
                backup_plan_id: record.backup_plan_id.clone(),
                backup_plan_name: record.document.backup_plan_name.clone(),
                creation_date: Some(record.creation_date),
                deletion_date: None,
                last_execution_date: None,
                version_id: Some(record.version_id.clone()),
            })
            .collect();
        let next_token = page_token(offset, page.len(), plans.len());
        Ok(BackupPlanPage { plans: page, next_token })
    }

    async fn create_backup_plan(
        &self,
        plan: &BackupPlanDocument,
    ) -> BackendResult<CreatedBackupPlan> {
        if plan.rules.is_empty() {
            return Err(BackendError::invalid_parameter("a plan needs at least one rule"));
        }

        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        let backup_plan_id = format!("plan-{n:04}");
        let creation_date = Utc::now();

        let mut plans = self.plans.lock().map_err(poisoned)?;
        plans.push(PlanRecord {
            backup_plan_id: backup_plan_id.clone(),
            document: plan.clone(),
            creation_date,
            version_id: "v1".to_string(),
        });

        Ok(CreatedBackupPlan {
            backup_plan_id: backup_plan_id.clone(),
            backup_plan_arn: Some(format!(
                "arn:aws:backup:us-east-1:123456789012:backup-plan:{backup_plan_id}"
            )),
            creation_date,
            version_id: Some("v1".to_string()),
        })
    }

    async fn get_backup_plan(&self, plan_id: &str) -> BackendResult<BackupPlanDetail> {
        let plans = self.plans.lock().map_err(poisoned)?;
        let record = plans
            .iter()
            .find(|record| record.backup_plan_id == plan_id)
            .ok_or_else(|| BackendError::not_found(format!("backup plan {plan_id}")))?;
        Ok(BackupPlanDetail {
            backup_plan_id: record.backup_plan_id.clone(),
            backup_plan: record.document.clone(),
            version_id: Some(record.version_id.clone()),
            creation_date: Some(record.creation_date),
        })
    }

    async fn delete_backup_plan(&self, plan_id: &str) -> BackendResult<()> {
        let mut plans = self.plans.lock().map_err(poisoned)?;
        let before = plans.len();
        plans.retain(|record| record.backup_plan_id != plan_id);
        if plans.len() == before {
            return Err(BackendError::not_found(format!("backup plan {plan_id}")));
        }
        Ok(())
    }

    async fn create_backup_selection(
        &self,
        plan_id: &str,
        selection: &BackupSelectionInput,
    ) -> BackendResult<CreatedBackupSelection> {
        let plans = self.plans.lock().map_err(poisoned)?;
        if !plans.iter().any(|record| record.backup_plan_id == plan_id) {
            return Err(BackendError::not_found(format!("backup plan {plan_id}")));
        }
        if selection.resources.is_empty() {
            return Err(BackendError::invalid_parameter("a selection needs at least one resource"));
        }

        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        Ok(CreatedBackupSelection {
            selection_id: format!("sel-{n:04}"),
            backup_plan_id: plan_id.to_string(),
            creation_date: Utc::now(),
        })
    }

    async fn list_backup_jobs(&self, next_token: Option<&str>) -> BackendResult<BackupJobPage> {
        let offset = token_offset(next_token)?;
        let page: Vec<BackupJobSummary> = self
            .jobs
            .iter()
            .skip(offset)
            .take(PAGE_SIZE)
            .cloned()
            .collect();
        let next_token = page_token(offset, page.len(), self.jobs.len());
        Ok(BackupJobPage { jobs: page, next_token })
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> BackendError {
    BackendError::new("InternalError", "fixture state poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plan_listing_pages_with_tokens() {
        let backend = InMemoryBackupBackend::new();

        let first = backend.list_backup_plans(None).await.unwrap();
        assert_eq!(first.plans.len(), 2);
        let token = first.next_token.expect("a second page");

        let second = backend.list_backup_plans(Some(&token)).await.unwrap();
        assert_eq!(second.plans.len(), 1);
        assert!(second.next_token.is_none());
    }

    #[tokio::test]
    async fn second_delete_reports_not_found() {
        let backend = InMemoryBackupBackend::new();

        backend.delete_backup_plan("plan-dev-0003").await.unwrap();
        let err = backend.delete_backup_plan("plan-dev-0003").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn created_plans_join_the_listing() {
        let backend = InMemoryBackupBackend::new();
        let document = BackupPlanDocument {
            backup_plan_name: "adhoc".to_string(),
            rules: vec![BackupRule {
                rule_name: "once".to_string(),
                target_backup_vault_name: "Default".to_string(),
                schedule_expression: "cron(0 12 * * ? *)".to_string(),
                lifecycle: None,
            }],
        };

        let created = backend.create_backup_plan(&document).await.unwrap();
        let detail = backend.get_backup_plan(&created.backup_plan_id).await.unwrap();
        assert_eq!(detail.backup_plan.backup_plan_name, "adhoc");
    }

    #[tokio::test]
    async fn selection_for_unknown_plan_is_not_found() {
        let backend = InMemoryBackupBackend::new();
        let selection = BackupSelectionInput {
            selection_name: "selection-missing".to_string(),
            iam_role_arn: "arn:aws:iam::123456789012:role/backup".to_string(),
            resources: vec!["arn:aws:ec2:us-east-1:123456789012:volume/vol-1".to_string()],
        };

        let err = backend
            .create_backup_selection("plan-missing", &selection)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
