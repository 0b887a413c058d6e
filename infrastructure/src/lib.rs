//! Infrastructure layer for opsbridge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod backends;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use backends::{
    InMemoryAutomationBackend, InMemoryBackupBackend, InMemoryComputeBackend,
    InMemorySupportBackend,
};
pub use config::{
    ConfigLoader, FileAutomationConfig, FileBackupConfig, FileConfig, FileLogConfig,
    FileSupportConfig,
};
pub use logging::JsonlInvocationLogger;
