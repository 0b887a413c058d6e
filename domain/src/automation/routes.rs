//! Closed route set for the automation action group.

/// Operations exposed by the automation action group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationRoute {
    /// Required/optional parameter names of a command document.
    DocumentParameters,
    /// Dispatch a command document against targets.
    ExecuteDocument,
    /// Status of a previously dispatched command.
    CommandStatus,
    /// Registered patch baselines.
    ListPatchBaselines,
    /// Create a patch baseline.
    CreatePatchBaseline,
    /// Full description of one patch baseline.
    DescribePatchBaseline,
    /// Update mutable fields of a patch baseline.
    UpdatePatchBaseline,
    /// Attach a patch group to a baseline.
    RegisterPatchGroup,
}

impl AutomationRoute {
    /// Every registered route, in catalogue order.
    pub const ALL: [AutomationRoute; 8] = [
        AutomationRoute::DocumentParameters,
        AutomationRoute::ExecuteDocument,
        AutomationRoute::CommandStatus,
        AutomationRoute::ListPatchBaselines,
        AutomationRoute::CreatePatchBaseline,
        AutomationRoute::DescribePatchBaseline,
        AutomationRoute::UpdatePatchBaseline,
        AutomationRoute::RegisterPatchGroup,
    ];

    /// Exact, case-sensitive lookup including the leading slash.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/get_document_parameters" => Some(AutomationRoute::DocumentParameters),
            "/execute_ssm_document" => Some(AutomationRoute::ExecuteDocument),
            "/check_command_status" => Some(AutomationRoute::CommandStatus),
            "/list_patch_baselines" => Some(AutomationRoute::ListPatchBaselines),
            "/create_patch_baseline" => Some(AutomationRoute::CreatePatchBaseline),
            "/describe_patch_baseline" => Some(AutomationRoute::DescribePatchBaseline),
            "/update_patch_baseline" => Some(AutomationRoute::UpdatePatchBaseline),
            "/register_patch_group" => Some(AutomationRoute::RegisterPatchGroup),
            _ => None,
        }
    }

    pub fn as_path(&self) -> &'static str {
        match self {
            AutomationRoute::DocumentParameters => "/get_document_parameters",
            AutomationRoute::ExecuteDocument => "/execute_ssm_document",
            AutomationRoute::CommandStatus => "/check_command_status",
            AutomationRoute::ListPatchBaselines => "/list_patch_baselines",
            AutomationRoute::CreatePatchBaseline => "/create_patch_baseline",
            AutomationRoute::DescribePatchBaseline => "/describe_patch_baseline",
            AutomationRoute::UpdatePatchBaseline => "/update_patch_baseline",
            AutomationRoute::RegisterPatchGroup => "/register_patch_group",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_round_trips_through_its_path() {
        for route in AutomationRoute::ALL {
            assert_eq!(AutomationRoute::from_path(route.as_path()), Some(route));
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(AutomationRoute::from_path("/run_ssm_document"), None);
        assert_eq!(AutomationRoute::from_path("/execute_ssm_document/"), None);
    }
}
