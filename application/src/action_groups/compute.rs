//! Compute action group: instance inventory and power control.

use std::sync::Arc;

use async_trait::async_trait;
use opsbridge_domain::backend::BackendError;
use opsbridge_domain::compute::{
    ComputeRoute, InstanceSelection, ListInstancesQuery, TagQuery,
};
use opsbridge_domain::dispatch::{DispatchError, RawArgument};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::ActionGroupHandler;
use crate::ports::compute_backend::ComputeBackend;

/// Handler for the compute action group.
pub struct ComputeActionGroup {
    backend: Arc<dyn ComputeBackend>,
}

impl ComputeActionGroup {
    pub fn new(backend: Arc<dyn ComputeBackend>) -> Self {
        Self { backend }
    }

    async fn details(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let query: TagQuery = argument.decode()?;
        let Some((tag_key, tag_value)) = query.tag() else {
            return Ok(json!({ "message": "Missing tag_key or tag_value in query." }));
        };

        match self.backend.describe_instances_by_tag(tag_key, tag_value).await {
            Ok(instances) => Ok(json!({ "instances": instances })),
            Err(error) => Ok(Self::backend_error(&error)),
        }
    }

    async fn networking(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let selection: InstanceSelection = argument.decode()?;
        let Some(ids) = selection.ids() else {
            return Ok(json!({ "message": "Missing or invalid instance_ids in query." }));
        };

        match self.backend.describe_network_interfaces(ids).await {
            Ok(interfaces) => Ok(json!({ "networking": interfaces })),
            Err(error) => Ok(Self::backend_error(&error)),
        }
    }

    async fn storage(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let selection: InstanceSelection = argument.decode()?;
        let Some(ids) = selection.ids() else {
            return Ok(json!({ "message": "Missing or invalid instance_ids in query." }));
        };

        match self.backend.describe_instance_volumes(ids).await {
            Ok(volumes) => Ok(json!({ "storage": volumes })),
            Err(error) => Ok(Self::backend_error(&error)),
        }
    }

    async fn start(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let selection: InstanceSelection = argument.decode()?;
        let Some(ids) = selection.ids() else {
            return Ok(json!({ "message": "Missing or invalid instance_ids in query." }));
        };

        match self.backend.start_instances(ids).await {
            Ok(changes) => Ok(json!({
                "message": format!("Successfully initiated start for {} instances", changes.len()),
                "instances": changes,
            })),
            Err(error) => Ok(Self::backend_error(&error)),
        }
    }

    async fn stop(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let selection: InstanceSelection = argument.decode()?;
        let Some(ids) = selection.ids() else {
            return Ok(json!({ "message": "Missing or invalid instance_ids in query." }));
        };

        match self.backend.stop_instances(ids, selection.force).await {
            Ok(changes) => Ok(json!({
                "message": format!("Successfully initiated stop for {} instances", changes.len()),
                "instances": changes,
            })),
            Err(error) => Ok(Self::backend_error(&error)),
        }
    }

    async fn list_all(&self, argument: &RawArgument) -> Result<Value, DispatchError> {
        let query: ListInstancesQuery = argument.decode_or_default()?;

        match self.backend.list_instances(query.state_filter()).await {
            Ok(instances) => Ok(json!({
                "message": format!("Found {} instances", instances.len()),
                "instances": instances,
            })),
            Err(error) => Ok(Self::backend_error(&error)),
        }
    }

    fn backend_error(error: &BackendError) -> Value {
        warn!(code = %error.code, "compute backend call failed");
        json!({ "message": format!("Error: {}", error.message) })
    }
}

#[async_trait]
impl ActionGroupHandler for ComputeActionGroup {
    // The listing accepts an invocation with no argument at all.
    fn requires_argument(&self) -> bool {
        false
    }

    fn api_paths(&self) -> Vec<&'static str> {
        ComputeRoute::ALL.iter().map(|r| r.as_path()).collect()
    }

    async fn dispatch(
        &self,
        api_path: &str,
        argument: &RawArgument,
    ) -> Result<Value, DispatchError> {
        let Some(route) = ComputeRoute::from_path(api_path) else {
            return Err(DispatchError::UnknownApiPath(api_path.to_string()));
        };
        debug!(path = api_path, "dispatching compute operation");

        match route {
            ComputeRoute::Details => self.details(argument).await,
            ComputeRoute::Networking => self.networking(argument).await,
            ComputeRoute::Storage => self.storage(argument).await,
            ComputeRoute::Start => self.start(argument).await,
            ComputeRoute::Stop => self.stop(argument).await,
            ComputeRoute::ListAll => self.list_all(argument).await,
        }
    }
}
