//! Settings file management

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ConsoleError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Console settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Backend configuration
    #[serde(default)]
    pub backend: BackendSettings,

    /// Lifecycle action dispatch
    #[serde(default)]
    pub dispatcher: DispatcherSettings,

    /// Log output
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Read settings from `file`, falling back to defaults when it does not exist
    pub async fn load(file: &File) -> Result<Self, ConsoleError> {
        if !file.exists().await {
            debug!("No settings file at {}, using defaults", file.path().display());
            return Ok(Self::default());
        }
        file.read_json::<Settings>().await
    }
}

/// Backend API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL for the backend API
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Action dispatcher settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatcherSettings {
    /// Wait before re-listing after a lifecycle action, in milliseconds
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
}

fn default_settle_delay() -> u64 {
    1500
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Emit JSON lines
    #[serde(default)]
    pub json: bool,

    /// Also write rolling log files under the config directory
    #[serde(default)]
    pub to_file: bool,
}
