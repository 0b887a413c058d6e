//! Automation action group: command documents and patch baselines.

pub mod records;
pub mod requests;
pub mod routes;

pub use records::{
    CommandInvocation, CommandTarget, DocumentParameters, NewPatchBaseline, PatchBaselineDetail,
    PatchBaselineIdentity, PatchBaselineUpdate,
};
pub use requests::{
    CreatePatchBaselineRequest, ExecuteDocumentRequest, RegisterPatchGroupRequest,
    UpdatePatchBaselineRequest,
};
pub use routes::AutomationRoute;
