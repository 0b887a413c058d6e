//! Support backend port.

use async_trait::async_trait;
use opsbridge_domain::backend::BackendResult;
use opsbridge_domain::support::{CaseFilters, NewSupportCase, SupportCase};

/// Port for the support-case collaborator.
#[async_trait]
pub trait SupportBackend: Send + Sync {
    /// Open a case; returns the case id.
    async fn create_case(&self, case: &NewSupportCase) -> BackendResult<String>;

    /// Cases matching the filters, most recent first.
    async fn describe_cases(&self, filters: &CaseFilters) -> BackendResult<Vec<SupportCase>>;

    /// Append a communication to a case. Returns false when the backend
    /// did not accept the communication.
    async fn add_communication(
        &self,
        case_id: &str,
        body: &str,
        cc_email_addresses: &[String],
    ) -> BackendResult<bool>;
}
