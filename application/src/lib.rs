//! Application layer for opsbridge
//!
//! This crate contains the action-group handlers, backend port definitions,
//! and the invocation-handling use case. It depends only on the domain layer.

pub mod action_groups;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use action_groups::{
    ActionGroupHandler, AutomationActionGroup, AutomationSettings, BackupActionGroup,
    BackupSettings, ComputeActionGroup, SupportActionGroup, SupportSettings,
};
pub use ports::{
    automation_backend::AutomationBackend,
    backup_backend::BackupBackend,
    compute_backend::ComputeBackend,
    invocation_logger::{InvocationLogger, InvocationRecord, NoInvocationLogger},
    support_backend::SupportBackend,
};
pub use use_cases::handle_invocation::HandleInvocation;
