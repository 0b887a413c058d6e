//! Result records for compute operations.
//!
//! Field names follow the backend's wire casing so payloads read the same
//! as the consoles and CLIs operators already know.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::time::serialize_opt_timestamp;

/// Key/value instance tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Instance row for tag-filtered lookups, with the full tag list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceDetail {
    pub instance_id: String,
    pub state: String,
    pub instance_type: String,
    pub tags: Vec<Tag>,
}

/// One attached network interface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkInterface {
    pub network_interface_id: String,
    pub private_ip_address: Option<String>,
    pub subnet_id: Option<String>,
    pub vpc_id: Option<String>,
    pub instance_id: Option<String>,
}

/// One EBS volume attachment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VolumeAttachment {
    pub instance_id: String,
    pub volume_id: String,
    pub device_name: String,
}

/// State transition acknowledged by a start or stop call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceStateChange {
    pub instance_id: String,
    pub current_state: String,
    pub previous_state: String,
}

/// Inventory row for the unfiltered listing. Tags flatten to a key/value
/// map on the wire; absent addresses serialize as null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceSummary {
    pub instance_id: String,
    pub instance_type: String,
    pub state: String,
    #[serde(serialize_with = "serialize_opt_timestamp")]
    pub launch_time: Option<DateTime<Utc>>,
    pub private_ip_address: Option<String>,
    pub public_ip_address: Option<String>,
    #[serde(serialize_with = "tags_as_map")]
    pub tags: Vec<Tag>,
}

fn tags_as_map<S>(tags: &[Tag], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let map: BTreeMap<&str, &str> = tags
        .iter()
        .map(|tag| (tag.key.as_str(), tag.value.as_str()))
        .collect();
    map.serialize(serializer)
}
