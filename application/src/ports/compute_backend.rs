//! Compute backend port.

use async_trait::async_trait;
use opsbridge_domain::backend::BackendResult;
use opsbridge_domain::compute::{
    InstanceDetail, InstanceStateChange, InstanceSummary, NetworkInterface, VolumeAttachment,
};

/// Port for the instance inventory and power-control collaborator.
///
/// Methods mirror the capabilities the compute action group needs, not the
/// full breadth of any particular cloud API.
#[async_trait]
pub trait ComputeBackend: Send + Sync {
    /// Instances carrying the given tag.
    async fn describe_instances_by_tag(
        &self,
        tag_key: &str,
        tag_value: &str,
    ) -> BackendResult<Vec<InstanceDetail>>;

    /// Network interfaces attached to the given instances.
    async fn describe_network_interfaces(
        &self,
        instance_ids: &[String],
    ) -> BackendResult<Vec<NetworkInterface>>;

    /// Volume attachments for the given instances.
    async fn describe_instance_volumes(
        &self,
        instance_ids: &[String],
    ) -> BackendResult<Vec<VolumeAttachment>>;

    /// Initiate a start and report the state transitions.
    async fn start_instances(
        &self,
        instance_ids: &[String],
    ) -> BackendResult<Vec<InstanceStateChange>>;

    /// Initiate a stop, optionally forced, and report the transitions.
    async fn stop_instances(
        &self,
        instance_ids: &[String],
        force: bool,
    ) -> BackendResult<Vec<InstanceStateChange>>;

    /// Whole inventory, optionally narrowed to one instance state.
    async fn list_instances(
        &self,
        state_filter: Option<&str>,
    ) -> BackendResult<Vec<InstanceSummary>>;
}
