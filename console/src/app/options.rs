//! Console runtime options

use std::time::Duration;

use crate::dispatch::dispatcher::DispatcherOptions;
use crate::logs::LogOptions;
use crate::storage::layout::StorageLayout;
use crate::storage::settings::Settings;

/// Main console options
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Backend API base URL
    pub backend_base_url: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Action dispatcher options
    pub dispatcher: DispatcherOptions,

    /// Logging options
    pub log: LogOptions,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default(), &StorageLayout::default(), None)
    }
}

impl ConsoleOptions {
    /// Build options from settings, letting an explicit backend URL win
    pub fn from_settings(
        settings: &Settings,
        layout: &StorageLayout,
        backend_url_override: Option<String>,
    ) -> Self {
        let backend_base_url = backend_url_override
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| settings.backend.base_url.clone());

        Self {
            backend_base_url,
            request_timeout: Duration::from_secs(settings.backend.request_timeout_secs),
            dispatcher: DispatcherOptions {
                settle_delay: Duration::from_millis(settings.dispatcher.settle_delay_ms),
            },
            log: LogOptions {
                log_level: settings.log_level,
                json_format: settings.logging.json,
                file_dir: settings.logging.to_file.then(|| layout.logs_dir()),
            },
        }
    }
}
