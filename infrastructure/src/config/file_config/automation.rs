//! Patch baseline default configuration

use opsbridge_application::AutomationSettings;
use serde::{Deserialize, Serialize};

/// Defaults applied to new patch baselines (`[automation]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAutomationConfig {
    /// Operating system a baseline targets when the request omits one
    pub operating_system: String,
    /// Compliance level stamped on default approval rules
    pub compliance_level: String,
}

impl Default for FileAutomationConfig {
    fn default() -> Self {
        let settings = AutomationSettings::default();
        Self {
            operating_system: settings.default_operating_system,
            compliance_level: settings.default_compliance_level,
        }
    }
}

impl FileAutomationConfig {
    /// Convert into the handler settings.
    pub fn to_settings(&self) -> AutomationSettings {
        AutomationSettings {
            default_operating_system: self.operating_system.clone(),
            default_compliance_level: self.compliance_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;

    #[test]
    fn deserializes_automation_section() {
        let toml_str = r#"
[automation]
operating_system = "WINDOWS"
compliance_level = "HIGH"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.automation.operating_system, "WINDOWS");
        assert_eq!(config.automation.compliance_level, "HIGH");
    }

    #[test]
    fn converts_to_settings() {
        let config: FileConfig = toml::from_str("").unwrap();
        let settings = config.automation.to_settings();
        assert_eq!(settings.default_operating_system, "AMAZON_LINUX_2");
        assert_eq!(settings.default_compliance_level, "CRITICAL");
    }
}
