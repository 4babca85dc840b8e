use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_SERVICE_URL;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelConfig {
    pub service_url: String,
    /// Seconds; unset means requests never time out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

const fn default_notification_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            request_timeout: None,
            notification_secs: default_notification_secs(),
            log_level: default_log_level(),
        }
    }
}

/// Panel colours, read from `media/style.toml` under the resource root.
#[allow(clippy::struct_field_names)]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub title_color: String,
    pub border_color: String,
    pub explain_color: String,
    pub generate_color: String,
    pub debug_color: String,
    pub run_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            title_color: "#333333".to_string(),
            border_color: "#cccccc".to_string(),
            explain_color: "#007acc".to_string(),
            generate_color: "#28a745".to_string(),
            debug_color: "#dc3545".to_string(),
            run_color: "#ffc107".to_string(),
        }
    }
}
