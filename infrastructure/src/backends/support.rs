//! Seeded in-memory support backend.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use opsbridge_application::SupportBackend;
use opsbridge_domain::backend::{BackendError, BackendResult};
use opsbridge_domain::format_timestamp;
use opsbridge_domain::support::{CaseCommunication, CaseFilters, NewSupportCase, SupportCase};

/// Support fixture over a seeded case list.
///
/// Seeded timestamps deliberately carry sub-second precision and offsets,
/// so callers see the raw forms a real backend produces.
pub struct InMemorySupportBackend {
    cases: Mutex<Vec<SupportCase>>,
    next_id: AtomicU64,
}

impl InMemorySupportBackend {
    pub fn new() -> Self {
        Self {
            cases: Mutex::new(seed_cases()),
            next_id: AtomicU64::new(1003),
        }
    }
}

impl Default for InMemorySupportBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_cases() -> Vec<SupportCase> {
    vec![
        SupportCase {
            case_id: "case-1001".to_string(),
            subject: Some("EC2 instance unreachable".to_string()),
            status: Some("opened".to_string()),
            service_code: Some("amazon-ec2".to_string()),
            category_code: Some("other".to_string()),
            severity_code: Some("high".to_string()),
            submitted_time: Some("2024-04-20T09:15:00.000Z".to_string()),
            recent_communications: vec![
                CaseCommunication {
                    body: Some("Still seeing timeouts from the ALB health checks.".to_string()),
                    submitted_by: Some("ops@example.com".to_string()),
                    time_created: Some("2024-04-21T08:00:00.000Z".to_string()),
                },
                CaseCommunication {
                    body: Some("Instance i-0a1b2c3d4e5f60001 stopped responding.".to_string()),
                    submitted_by: Some("ops@example.com".to_string()),
                    time_created: Some("2024-04-20T09:15:00.000Z".to_string()),
                },
            ],
        },
        SupportCase {
            case_id: "case-1002".to_string(),
            subject: Some("Question about backup retention".to_string()),
            status: Some("resolved".to_string()),
            service_code: Some("aws-backup".to_string()),
            category_code: Some("general-guidance".to_string()),
            severity_code: Some("low".to_string()),
            submitted_time: Some("2024-03-11T16:42:10.5+00:00".to_string()),
            recent_communications: Vec::new(),
        },
    ]
}

fn parse_time(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[async_trait]
impl SupportBackend for InMemorySupportBackend {
    async fn create_case(&self, case: &NewSupportCase) -> BackendResult<String> {
        if case.subject.is_empty() {
            return Err(BackendError::invalid_parameter("subject must not be empty"));
        }

        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        let case_id = format!("case-{n}");
        let now = format_timestamp(&Utc::now());

        let mut cases = self.cases.lock().map_err(poisoned)?;
        cases.push(SupportCase {
            case_id: case_id.clone(),
            subject: Some(case.subject.clone()),
            status: Some("opened".to_string()),
            service_code: Some(case.service_code.clone()),
            category_code: Some(case.category_code.clone()),
            severity_code: Some(case.severity_code.clone()),
            submitted_time: Some(now.clone()),
            recent_communications: vec![CaseCommunication {
                body: Some(case.communication_body.clone()),
                submitted_by: case.cc_email_addresses.first().cloned(),
                time_created: Some(now),
            }],
        });
        Ok(case_id)
    }

    async fn describe_cases(&self, filters: &CaseFilters) -> BackendResult<Vec<SupportCase>> {
        let cases = self.cases.lock().map_err(poisoned)?;
        let after = parse_time(filters.after_time.as_deref());
        let before = parse_time(filters.before_time.as_deref());

        let mut matched: Vec<SupportCase> = cases
            .iter()
            .filter(|case| {
                if !filters.include_resolved && case.status.as_deref() == Some("resolved") {
                    return false;
                }
                if !filters.case_id_list.is_empty()
                    && !filters.case_id_list.contains(&case.case_id)
                {
                    return false;
                }
                let submitted = parse_time(case.submitted_time.as_deref());
                if let (Some(after), Some(submitted)) = (after, submitted)
                    && submitted < after
                {
                    return false;
                }
                if let (Some(before), Some(submitted)) = (before, submitted)
                    && submitted > before
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        // most recent first
        matched.sort_by_key(|case| std::cmp::Reverse(parse_time(case.submitted_time.as_deref())));
        Ok(matched)
    }

    async fn add_communication(
        &self,
        case_id: &str,
        body: &str,
        cc_email_addresses: &[String],
    ) -> BackendResult<bool> {
        let mut cases = self.cases.lock().map_err(poisoned)?;
        let Some(case) = cases.iter_mut().find(|case| case.case_id == case_id) else {
            return Ok(false);
        };
        case.recent_communications.insert(
            0,
            CaseCommunication {
                body: Some(body.to_string()),
                submitted_by: cc_email_addresses.first().cloned(),
                time_created: Some(format_timestamp(&Utc::now())),
            },
        );
        Ok(true)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> BackendError {
    BackendError::new("InternalError", "fixture state poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_case(subject: &str) -> NewSupportCase {
        NewSupportCase {
            subject: subject.to_string(),
            service_code: "amazon-bedrock".to_string(),
            category_code: "other".to_string(),
            severity_code: "low".to_string(),
            communication_body: "body".to_string(),
            cc_email_addresses: Vec::new(),
            language: "en".to_string(),
            issue_type: "technical".to_string(),
        }
    }

    #[tokio::test]
    async fn resolved_cases_are_hidden_by_default() {
        let backend = InMemorySupportBackend::new();

        let open = backend.describe_cases(&CaseFilters::default()).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].case_id, "case-1001");

        let all = backend
            .describe_cases(&CaseFilters {
                include_resolved: true,
                ..CaseFilters::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn case_id_filter_narrows_the_listing() {
        let backend = InMemorySupportBackend::new();
        let filters = CaseFilters {
            include_resolved: true,
            case_id_list: vec!["case-1002".to_string()],
            ..CaseFilters::default()
        };

        let cases = backend.describe_cases(&filters).await.unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].case_id, "case-1002");
    }

    #[tokio::test]
    async fn created_cases_show_up_as_opened() {
        let backend = InMemorySupportBackend::new();
        let case_id = backend.create_case(&new_case("Deploy failed")).await.unwrap();

        let cases = backend.describe_cases(&CaseFilters::default()).await.unwrap();
        let created = cases.iter().find(|case| case.case_id == case_id).unwrap();
        assert_eq!(created.status.as_deref(), Some("opened"));
        assert_eq!(created.recent_communications.len(), 1);
    }

    #[tokio::test]
    async fn communications_report_acceptance() {
        let backend = InMemorySupportBackend::new();

        let accepted = backend
            .add_communication("case-1001", "new update", &[])
            .await
            .unwrap();
        assert!(accepted);

        let rejected = backend
            .add_communication("case-9999", "new update", &[])
            .await
            .unwrap();
        assert!(!rejected);
    }
}
