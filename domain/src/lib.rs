//! Domain layer for opsbridge
//!
//! This crate contains the wire protocol, dispatch primitives, and the typed
//! operation schemas for every action group. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Action Group
//!
//! An action group is a named bundle of operations exposed to an agent
//! orchestrator as a single tool surface. Four groups exist:
//!
//! - **Compute**: instance inventory and power control
//! - **Automation**: command documents and patch baselines
//! - **Backup**: backup plans, resource assignments, and jobs
//! - **Support**: support case lifecycle
//!
//! ## Dispatch
//!
//! Every invocation carries exactly one operation argument as a raw string.
//! Routing is closed: each group owns an enum of registered api paths, and
//! anything outside it is rejected before any backend work happens.
//!
//! ## Outcome Classes
//!
//! - **Envelope errors** ([`DispatchError`]): request-shape and internal
//!   faults, surfaced as 400/500 envelopes
//! - **Soft errors**: domain validation and backend-reported failures,
//!   described inside a 200 envelope body

pub mod automation;
pub mod backend;
pub mod backup;
pub mod compute;
pub mod dispatch;
pub mod protocol;
pub mod support;
pub mod time;

// Re-export commonly used types
pub use backend::{BackendError, BackendResult};
pub use dispatch::{argument::RawArgument, error::DispatchError};
pub use protocol::{
    envelope::{MESSAGE_VERSION, ResponseEnvelope},
    request::{InvocationRequest, RequestParameter},
};
pub use time::{format_timestamp, normalize_timestamp};
