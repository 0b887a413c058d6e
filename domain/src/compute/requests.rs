//! Typed argument schemas for compute operations.

use serde::Deserialize;

/// Argument for `/get_ec2_details`: a tag to filter instances by.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagQuery {
    #[serde(default)]
    pub tag_key: Option<String>,
    #[serde(default)]
    pub tag_value: Option<String>,
}

impl TagQuery {
    /// The tag pair when both halves are present and non-empty.
    pub fn tag(&self) -> Option<(&str, &str)> {
        match (self.tag_key.as_deref(), self.tag_value.as_deref()) {
            (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                Some((key, value))
            }
            _ => None,
        }
    }
}

/// Argument for the instance-id keyed operations: networking, storage,
/// start, and stop.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceSelection {
    #[serde(default)]
    pub instance_ids: Option<Vec<String>>,
    /// Stop only: force the stop regardless of guest state.
    #[serde(default)]
    pub force: bool,
}

impl InstanceSelection {
    /// The id list when present and non-empty.
    pub fn ids(&self) -> Option<&[String]> {
        match self.instance_ids.as_deref() {
            Some(ids) if !ids.is_empty() => Some(ids),
            _ => None,
        }
    }
}

/// Argument for `/list_all_ec2_instances`. The whole object is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListInstancesQuery {
    /// Instance state to filter on, such as `running` or `stopped`.
    #[serde(default)]
    pub state: Option<String>,
}

impl ListInstancesQuery {
    /// The state filter when present and non-empty.
    pub fn state_filter(&self) -> Option<&str> {
        self.state.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_requires_both_halves() {
        let query: TagQuery = serde_json::from_str(r#"{"tag_key": "Name"}"#).unwrap();
        assert_eq!(query.tag(), None);

        let query: TagQuery =
            serde_json::from_str(r#"{"tag_key": "Name", "tag_value": ""}"#).unwrap();
        assert_eq!(query.tag(), None);

        let query: TagQuery =
            serde_json::from_str(r#"{"tag_key": "Name", "tag_value": "web"}"#).unwrap();
        assert_eq!(query.tag(), Some(("Name", "web")));
    }

    #[test]
    fn empty_id_list_counts_as_missing() {
        let selection: InstanceSelection =
            serde_json::from_str(r#"{"instance_ids": []}"#).unwrap();
        assert_eq!(selection.ids(), None);

        let selection: InstanceSelection = serde_json::from_str("{}").unwrap();
        assert_eq!(selection.ids(), None);
    }

    #[test]
    fn force_defaults_to_off() {
        let selection: InstanceSelection =
            serde_json::from_str(r#"{"instance_ids": ["i-0abc"]}"#).unwrap();
        assert!(!selection.force);

        let selection: InstanceSelection =
            serde_json::from_str(r#"{"instance_ids": ["i-0abc"], "force": true}"#).unwrap();
        assert!(selection.force);
    }

    #[test]
    fn blank_state_filter_is_ignored() {
        let query: ListInstancesQuery = serde_json::from_str(r#"{"state": ""}"#).unwrap();
        assert_eq!(query.state_filter(), None);

        let query: ListInstancesQuery = serde_json::from_str(r#"{"state": "running"}"#).unwrap();
        assert_eq!(query.state_filter(), Some("running"));
    }
}
