//! Backup plan default configuration

use opsbridge_application::BackupSettings;
use serde::{Deserialize, Serialize};

/// Defaults applied to new backup plans (`[backup]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackupConfig {
    /// Vault that receives recovery points when a rule omits one
    pub vault_name: String,
}

impl Default for FileBackupConfig {
    fn default() -> Self {
        let settings = BackupSettings::default();
        Self { vault_name: settings.default_vault_name }
    }
}

impl FileBackupConfig {
    /// Convert into the handler settings.
    pub fn to_settings(&self) -> BackupSettings {
        BackupSettings { default_vault_name: self.vault_name.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;

    #[test]
    fn deserializes_backup_section() {
        let config: FileConfig = toml::from_str("[backup]\nvault_name = \"archive\"").unwrap();
        assert_eq!(config.backup.vault_name, "archive");
        assert_eq!(config.backup.to_settings().default_vault_name, "archive");
    }
}
