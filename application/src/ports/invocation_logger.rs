//! Invocation logger port.
//!
//! Separate from the tracing diagnostics: tracing carries human-readable
//! events, this port captures one machine-readable record per envelope for
//! later analysis.

use serde::Serialize;

/// One handled invocation, summarized for the structured log.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationRecord {
    /// Wall-clock time the envelope was produced.
    pub timestamp: String,
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    /// Envelope status code.
    pub status: u16,
    pub duration_ms: u64,
}

/// Port for recording handled invocations.
///
/// Synchronous and non-fallible: implementations swallow their own I/O
/// failures rather than disturb dispatch.
pub trait InvocationLogger: Send + Sync {
    fn log(&self, record: &InvocationRecord);
}

/// No-op logger for tests and for runs without a log destination.
pub struct NoInvocationLogger;

impl InvocationLogger for NoInvocationLogger {
    fn log(&self, _record: &InvocationRecord) {}
}
