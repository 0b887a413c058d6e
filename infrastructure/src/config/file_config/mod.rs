//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into handler settings at
//! assembly time.

mod automation;
mod backup;
mod log;
mod support;

pub use automation::FileAutomationConfig;
pub use backup::FileBackupConfig;
pub use log::FileLogConfig;
pub use support::FileSupportConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Log destinations
    pub log: FileLogConfig,
    /// Support case defaults
    pub support: FileSupportConfig,
    /// Patch baseline defaults
    pub automation: FileAutomationConfig,
    /// Backup plan defaults
    pub backup: FileBackupConfig,
}

impl FileConfig {
    /// Validate the configuration, returning human-readable warnings.
    ///
    /// Nothing here is fatal: suspect values are reported and the run
    /// continues with them.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let severity = self.support.severity_code.as_str();
        let known_severities = ["low", "normal", "high", "urgent", "critical"];
        if !known_severities.contains(&severity) {
            warnings.push(format!(
                "support.severity_code: unknown value '{severity}', the backend may reject it"
            ));
        }

        let compliance = self.automation.compliance_level.as_str();
        let known_levels = ["CRITICAL", "HIGH", "MEDIUM", "LOW", "INFORMATIONAL", "UNSPECIFIED"];
        if !known_levels.contains(&compliance) {
            warnings.push(format!(
                "automation.compliance_level: unknown value '{compliance}', the backend may reject it"
            ));
        }

        if self.backup.vault_name.is_empty() {
            warnings.push("backup.vault_name: empty value, plan creation will fail".to_string());
        }

        warnings
    }
}
