//! Orchestrator wire protocol: invocation requests and response envelopes.

pub mod envelope;
pub mod request;

pub use envelope::{MESSAGE_VERSION, ResponseEnvelope};
pub use request::{InvocationRequest, RequestParameter};
