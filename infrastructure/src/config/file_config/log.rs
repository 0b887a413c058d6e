//! Log destination configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Log file locations (`[log]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Where to append one JSON line per handled invocation.
    /// Unset disables invocation logging.
    pub invocation_log: Option<PathBuf>,
    /// Where to write diagnostic traces. Unset keeps traces on stderr.
    pub trace_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;

    #[test]
    fn deserializes_log_section() {
        let toml_str = r#"
[log]
invocation_log = "invocations.jsonl"
trace_file = "trace.log"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.log.invocation_log.as_deref(),
            Some(std::path::Path::new("invocations.jsonl"))
        );
        assert_eq!(
            config.log.trace_file.as_deref(),
            Some(std::path::Path::new("trace.log"))
        );
    }

    #[test]
    fn defaults_to_no_files() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.log.invocation_log.is_none());
        assert!(config.log.trace_file.is_none());
    }
}
