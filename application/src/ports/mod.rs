//! Port definitions (interfaces for external adapters)
//!
//! One backend port per action group, plus the invocation log sink.
//! Implementations live in the infrastructure layer and are injected at
//! assembly time, so handlers never construct clients themselves.

pub mod automation_backend;
pub mod backup_backend;
pub mod compute_backend;
pub mod invocation_logger;
pub mod support_backend;

pub use automation_backend::AutomationBackend;
pub use backup_backend::BackupBackend;
pub use compute_backend::ComputeBackend;
pub use invocation_logger::{InvocationLogger, InvocationRecord, NoInvocationLogger};
pub use support_backend::SupportBackend;
