//! Action-group handlers: one dispatcher per tool surface.
//!
//! Each handler owns a closed route set, decodes the raw argument into the
//! operation's typed schema, runs exactly one backend capability through an
//! injected port, and shapes the outcome into a serializable payload.
//! Request-shape and internal faults surface as [`DispatchError`]; domain
//! validation and backend-reported failures stay inside 200 payloads.

mod automation;
mod backup;
mod compute;
mod support;

pub use automation::{AutomationActionGroup, AutomationSettings};
pub use backup::{BackupActionGroup, BackupSettings};
pub use compute::ComputeActionGroup;
pub use support::{SupportActionGroup, SupportSettings};

use async_trait::async_trait;
use opsbridge_domain::dispatch::{DispatchError, RawArgument};
use serde_json::Value;

/// Dispatcher for one action group.
#[async_trait]
pub trait ActionGroupHandler: Send + Sync {
    /// Whether an invocation without parameters is a client error for this
    /// group. Groups whose operations all tolerate an empty argument return
    /// false and receive an empty [`RawArgument`] instead.
    fn requires_argument(&self) -> bool {
        true
    }

    /// Registered api paths, for discovery surfaces.
    fn api_paths(&self) -> Vec<&'static str>;

    /// Route the api path and execute its operation.
    async fn dispatch(
        &self,
        api_path: &str,
        argument: &RawArgument,
    ) -> Result<Value, DispatchError>;
}
