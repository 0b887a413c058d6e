//! Support action group: case lifecycle.

pub mod records;
pub mod requests;
pub mod routes;

pub use records::{CaseCommunication, NewSupportCase, SupportCase};
pub use requests::{
    CaseFilters, CreateSupportCaseRequest, ErrorDetails, UpdateSupportCaseRequest,
};
pub use routes::SupportRoute;
