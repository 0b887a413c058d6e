//! Support case default configuration

use opsbridge_application::SupportSettings;
use serde::{Deserialize, Serialize};

/// Defaults applied to new support cases (`[support]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSupportConfig {
    /// Service code attached to cases that do not name one
    pub service_code: String,
    /// Category code within the service
    pub category_code: String,
    /// Severity code for new cases
    pub severity_code: String,
    /// Communication language
    pub language: String,
    /// Issue type (for example "technical" or "customer-service")
    pub issue_type: String,
    /// Fallback service code used when the backend rejects the first one
    pub fallback_service_code: String,
    /// Fallback category code paired with the fallback service
    pub fallback_category_code: String,
}

impl Default for FileSupportConfig {
    fn default() -> Self {
        let settings = SupportSettings::default();
        Self {
            service_code: settings.default_service_code,
            category_code: settings.default_category_code,
            severity_code: settings.default_severity_code,
            language: settings.default_language,
            issue_type: settings.issue_type,
            fallback_service_code: settings.fallback_service_code,
            fallback_category_code: settings.fallback_category_code,
        }
    }
}

impl FileSupportConfig {
    /// Convert into the handler settings.
    pub fn to_settings(&self) -> SupportSettings {
        SupportSettings {
            default_service_code: self.service_code.clone(),
            default_category_code: self.category_code.clone(),
            default_severity_code: self.severity_code.clone(),
            default_language: self.language.clone(),
            issue_type: self.issue_type.clone(),
            fallback_service_code: self.fallback_service_code.clone(),
            fallback_category_code: self.fallback_category_code.clone(),
        }
    }
}
