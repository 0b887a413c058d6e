//! In-memory backend fixtures.
//!
//! Each fixture implements one application port over seeded state behind a
//! `Mutex`, so the CLI runs end-to-end without external credentials and
//! integration tests get deterministic data. State mutations (start, stop,
//! create, delete) are visible to later calls on the same instance.

mod automation;
mod backup;
mod compute;
mod support;

pub use automation::InMemoryAutomationBackend;
pub use backup::InMemoryBackupBackend;
pub use compute::InMemoryComputeBackend;
pub use support::InMemorySupportBackend;
