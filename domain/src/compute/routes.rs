//! Closed route set for the compute action group.

/// Operations exposed by the compute action group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeRoute {
    /// Instances matching a tag, with their tag lists.
    Details,
    /// Network interfaces attached to the given instances.
    Networking,
    /// Volume attachments for the given instances.
    Storage,
    /// Initiate an instance start.
    Start,
    /// Initiate an instance stop.
    Stop,
    /// Whole inventory, optionally filtered by state.
    ListAll,
}

impl ComputeRoute {
    /// Every registered route, in catalogue order.
    pub const ALL: [ComputeRoute; 6] = [
        ComputeRoute::Details,
        ComputeRoute::Networking,
        ComputeRoute::Storage,
        ComputeRoute::Start,
        ComputeRoute::Stop,
        ComputeRoute::ListAll,
    ];

    /// Exact, case-sensitive lookup including the leading slash.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/get_ec2_details" => Some(ComputeRoute::Details),
            "/get_ec2_networking" => Some(ComputeRoute::Networking),
            "/get_ec2_storage" => Some(ComputeRoute::Storage),
            "/start_ec2_instances" => Some(ComputeRoute::Start),
            "/stop_ec2_instances" => Some(ComputeRoute::Stop),
            "/list_all_ec2_instances" => Some(ComputeRoute::ListAll),
            _ => None,
        }
    }

    pub fn as_path(&self) -> &'static str {
        match self {
            ComputeRoute::Details => "/get_ec2_details",
            ComputeRoute::Networking => "/get_ec2_networking",
            ComputeRoute::Storage => "/get_ec2_storage",
            ComputeRoute::Start => "/start_ec2_instances",
            ComputeRoute::Stop => "/stop_ec2_instances",
            ComputeRoute::ListAll => "/list_all_ec2_instances",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_round_trips_through_its_path() {
        for route in ComputeRoute::ALL {
            assert_eq!(ComputeRoute::from_path(route.as_path()), Some(route));
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(ComputeRoute::from_path("/get_vm_details"), None);
        assert_eq!(ComputeRoute::from_path("/GET_EC2_DETAILS"), None);
        assert_eq!(ComputeRoute::from_path("get_ec2_details"), None);
        assert_eq!(ComputeRoute::from_path(""), None);
    }
}
