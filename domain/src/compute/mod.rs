//! Compute action group: instance inventory and power control.

pub mod records;
pub mod requests;
pub mod routes;

pub use records::{
    InstanceDetail, InstanceStateChange, InstanceSummary, NetworkInterface, Tag, VolumeAttachment,
};
pub use requests::{InstanceSelection, ListInstancesQuery, TagQuery};
pub use routes::ComputeRoute;
