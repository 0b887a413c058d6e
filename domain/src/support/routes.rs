//! Closed route set for the support action group.

/// Operations exposed by the support action group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportRoute {
    /// Open a support case, enriched with optional error context.
    CreateCase,
    /// Recent cases, with truncated communication history.
    GetCases,
    /// Append a communication to an existing case.
    UpdateCase,
}

impl SupportRoute {
    /// Every registered route, in catalogue order.
    pub const ALL: [SupportRoute; 3] = [
        SupportRoute::CreateCase,
        SupportRoute::GetCases,
        SupportRoute::UpdateCase,
    ];

    /// Exact, case-sensitive lookup including the leading slash.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/create_support_case" => Some(SupportRoute::CreateCase),
            "/get_support_cases" => Some(SupportRoute::GetCases),
            "/update_support_case" => Some(SupportRoute::UpdateCase),
            _ => None,
        }
    }

    pub fn as_path(&self) -> &'static str {
        match self {
            SupportRoute::CreateCase => "/create_support_case",
            SupportRoute::GetCases => "/get_support_cases",
            SupportRoute::UpdateCase => "/update_support_case",
        }
    }
}
