//! JSONL file writer for invocation records.
//!
//! Each [`InvocationRecord`] is serialized as a single JSON line and
//! appended to the file via a buffered writer.

use opsbridge_application::ports::invocation_logger::{InvocationLogger, InvocationRecord};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL invocation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlInvocationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlInvocationLogger {
    /// Create a new logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create invocation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open invocation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InvocationLogger for JsonlInvocationLogger {
    fn log(&self, record: &InvocationRecord) {
        let Ok(line) = serde_json::to_string(record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlInvocationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn sample_record(api_path: &str, status: u16) -> InvocationRecord {
        InvocationRecord {
            timestamp: "2024-05-01T12:00:00Z".to_string(),
            action_group: "EC2ActionGroup".to_string(),
            api_path: api_path.to_string(),
            http_method: "GET".to_string(),
            status,
            duration_ms: 3,
        }
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.invocations.jsonl");
        let logger = JsonlInvocationLogger::new(&path).unwrap();

        logger.log(&sample_record("/list_all_ec2_instances", 200));
        logger.log(&sample_record("/bad_path", 400));

        // Flush
        drop(logger);

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();

        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["api_path"], "/list_all_ec2_instances");
        assert_eq!(first["status"], 200);
        assert_eq!(first["action_group"], "EC2ActionGroup");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["api_path"], "/bad_path");
        assert_eq!(second["status"], 400);
    }

    #[test]
    fn test_jsonl_logger_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("append.jsonl");

        let first = JsonlInvocationLogger::new(&path).unwrap();
        first.log(&sample_record("/list_all_ec2_instances", 200));
        drop(first);

        let second = JsonlInvocationLogger::new(&path).unwrap();
        second.log(&sample_record("/start_ec2_instances", 200));
        drop(second);

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content.trim().lines().count(), 2);
    }

    #[test]
    fn test_jsonl_logger_returns_none_for_invalid_path() {
        let result = JsonlInvocationLogger::new("/proc/no-such-dir/file.jsonl");
        assert!(result.is_none());
    }
}
