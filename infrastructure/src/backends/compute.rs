//! Seeded in-memory compute backend.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use opsbridge_application::ComputeBackend;
use opsbridge_domain::backend::{BackendError, BackendResult};
use opsbridge_domain::compute::{
    InstanceDetail, InstanceStateChange, InstanceSummary, NetworkInterface, Tag, VolumeAttachment,
};

struct InstanceRecord {
    instance_id: String,
    instance_type: String,
    state: String,
    launch_time: Option<DateTime<Utc>>,
    private_ip_address: Option<String>,
    public_ip_address: Option<String>,
    subnet_id: String,
    vpc_id: String,
    tags: Vec<Tag>,
}

/// Compute fixture over a small seeded inventory.
///
/// Start and stop transition instance state the way the real service
/// acknowledges them: `stopped -> pending` and `running -> stopping`.
pub struct InMemoryComputeBackend {
    instances: Mutex<Vec<InstanceRecord>>,
}

impl InMemoryComputeBackend {
    pub fn new() -> Self {
        Self {
            instances: Mutex::new(seed_instances()),
        }
    }
}

impl Default for InMemoryComputeBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_instances() -> Vec<InstanceRecord> {
    vec![
        InstanceRecord {
            instance_id: "i-0a1b2c3d4e5f60001".to_string(),
            instance_type: "t3.micro".to_string(),
            state: "running".to_string(),
            launch_time: Some(Utc.with_ymd_and_hms(2024, 4, 2, 8, 30, 0).unwrap()),
            private_ip_address: Some("10.0.1.10".to_string()),
            public_ip_address: Some("203.0.113.10".to_string()),
            subnet_id: "subnet-0f1e2d3c".to_string(),
            vpc_id: "vpc-0a9b8c7d".to_string(),
            tags: vec![Tag::new("Name", "web-server-1"), Tag::new("Environment", "prod")],
        },
        InstanceRecord {
            instance_id: "i-0a1b2c3d4e5f60002".to_string(),
            instance_type: "t3.large".to_string(),
            state: "stopped".to_string(),
            launch_time: Some(Utc.with_ymd_and_hms(2024, 2, 14, 19, 5, 0).unwrap()),
            private_ip_address: Some("10.0.1.11".to_string()),
            public_ip_address: None,
            subnet_id: "subnet-0f1e2d3c".to_string(),
            vpc_id: "vpc-0a9b8c7d".to_string(),
            tags: vec![Tag::new("Name", "worker-1"), Tag::new("Environment", "prod")],
        },
        InstanceRecord {
            instance_id: "i-0a1b2c3d4e5f60003".to_string(),
            instance_type: "t3.medium".to_string(),
            state: "running".to_string(),
            launch_time: Some(Utc.with_ymd_and_hms(2024, 5, 20, 11, 0, 0).unwrap()),
            private_ip_address: Some("10.0.2.20".to_string()),
            public_ip_address: None,
            subnet_id: "subnet-0b5c6d7e".to_string(),
            vpc_id: "vpc-0a9b8c7d".to_string(),
            tags: vec![Tag::new("Name", "build-agent"), Tag::new("Environment", "dev")],
        },
    ]
}

#[async_trait]
impl ComputeBackend for InMemoryComputeBackend {
    async fn describe_instances_by_tag(
        &self,
        tag_key: &str,
        tag_value: &str,
    ) -> BackendResult<Vec<InstanceDetail>> {
        let instances = self.instances.lock().map_err(poisoned)?;
        Ok(instances
            .iter()
            .filter(|record| {
                record
                    .tags
                    .iter()
                    .any(|tag| tag.key == tag_key && tag.value == tag_value)
            })
            .map(|record| InstanceDetail {
                instance_id: record.instance_id.clone(),
                state: record.state.clone(),
                instance_type: record.instance_type.clone(),
                tags: record.tags.clone(),
            })
            .collect())
    }

    async fn describe_network_interfaces(
        &self,
        instance_ids: &[String],
    ) -> BackendResult<Vec<NetworkInterface>> {
        let instances = self.instances.lock().map_err(poisoned)?;
        Ok(instances
            .iter()
            .filter(|record| instance_ids.contains(&record.instance_id))
            .enumerate()
            .map(|(index, record)| NetworkInterface {
                network_interface_id: format!("eni-0c0ffee{:08x}", index + 1),
                private_ip_address: record.private_ip_address.clone(),
                subnet_id: Some(record.subnet_id.clone()),
                vpc_id: Some(record.vpc_id.clone()),
                instance_id: Some(record.instance_id.clone()),
            })
            .collect())
    }

    async fn describe_instance_volumes(
        &self,
        instance_ids: &[String],
    ) -> BackendResult<Vec<VolumeAttachment>> {
        let instances = self.instances.lock().map_err(poisoned)?;
        Ok(instances
            .iter()
            .filter(|record| instance_ids.contains(&record.instance_id))
            .enumerate()
            .map(|(index, record)| VolumeAttachment {
                instance_id: record.instance_id.clone(),
                volume_id: format!("vol-0d15c{:08x}", index + 1),
                device_name: "/dev/xvda".to_string(),
            })
            .collect())
    }

    async fn start_instances(
        &self,
        instance_ids: &[String],
    ) -> BackendResult<Vec<InstanceStateChange>> {
        let mut instances = self.instances.lock().map_err(poisoned)?;
        let mut changes = Vec::with_capacity(instance_ids.len());
        for id in instance_ids {
            let record = instances
                .iter_mut()
                .find(|record| &record.instance_id == id)
                .ok_or_else(|| BackendError::not_found(format!("instance {id}")))?;
            let previous = record.state.clone();
            if record.state == "stopped" {
                record.state = "pending".to_string();
            }
            changes.push(InstanceStateChange {
                instance_id: record.instance_id.clone(),
                current_state: record.state.clone(),
                previous_state: previous,
            });
        }
        Ok(changes)
    }

    async fn stop_instances(
        &self,
        instance_ids: &[String],
        force: bool,
    ) -> BackendResult<Vec<InstanceStateChange>> {
        let mut instances = self.instances.lock().map_err(poisoned)?;
        let mut changes = Vec::with_capacity(instance_ids.len());
        for id in instance_ids {
            let record = instances
                .iter_mut()
                .find(|record| &record.instance_id == id)
                .ok_or_else(|| BackendError::not_found(format!("instance {id}")))?;
            let previous = record.state.clone();
            if force || record.state == "running" || record.state == "pending" {
                record.state = "stopping".to_string();
            }
            changes.push(InstanceStateChange {
                instance_id: record.instance_id.clone(),
                current_state: record.state.clone(),
                previous_state: previous,
            });
        }
        Ok(changes)
    }

    async fn list_instances(
        &self,
        state_filter: Option<&str>,
    ) -> BackendResult<Vec<InstanceSummary>> {
        let instances = self.instances.lock().map_err(poisoned)?;
        Ok(instances
            .iter()
            .filter(|record| state_filter.is_none_or(|state| record.state == state))
            .map(|record| InstanceSummary {
                instance_id: record.instance_id.clone(),
                instance_type: record.instance_type.clone(),
                state: record.state.clone(),
                launch_time: record.launch_time,
                private_ip_address: record.private_ip_address.clone(),
                public_ip_address: record.public_ip_address.clone(),
                tags: record.tags.clone(),
            })
            .collect())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> BackendError {
    BackendError::new("InternalError", "fixture state poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn filters_by_tag() {
        let backend = InMemoryComputeBackend::new();
        let prod = backend
            .describe_instances_by_tag("Environment", "prod")
            .await
            .unwrap();
        assert_eq!(prod.len(), 2);
        assert!(prod.iter().all(|i| i.tags.iter().any(|t| t.value == "prod")));
    }

    #[tokio::test]
    async fn start_transitions_stopped_to_pending() {
        let backend = InMemoryComputeBackend::new();
        let ids = vec!["i-0a1b2c3d4e5f60002".to_string()];

        let changes = backend.start_instances(&ids).await.unwrap();
        assert_eq!(changes[0].previous_state, "stopped");
        assert_eq!(changes[0].current_state, "pending");

        // visible to a later listing
        let pending = backend.list_instances(Some("pending")).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].instance_id, "i-0a1b2c3d4e5f60002");
    }

    #[tokio::test]
    async fn stop_of_unknown_instance_reports_not_found() {
        let backend = InMemoryComputeBackend::new();
        let ids = vec!["i-ffffffffffffffff".to_string()];

        let err = backend.stop_instances(&ids, false).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn interfaces_for_unknown_instances_are_empty() {
        let backend = InMemoryComputeBackend::new();
        let ids = vec!["i-ffffffffffffffff".to_string()];

        let interfaces = backend.describe_network_interfaces(&ids).await.unwrap();
        assert!(interfaces.is_empty());
    }
}
