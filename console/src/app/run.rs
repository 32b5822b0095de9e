//! Console bootstrap

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::app::options::ConsoleOptions;
use crate::errors::ConsoleError;
use crate::filesys::file::File;
use crate::http::client::HttpClient;
use crate::shell::console::Console;
use crate::storage::layout::StorageLayout;
use crate::storage::settings::Settings;

/// Resolve options from the settings file and the backend URL override
pub async fn load_options(
    config: Option<PathBuf>,
    backend_url: Option<String>,
) -> Result<ConsoleOptions, ConsoleError> {
    let layout = StorageLayout::default();
    let settings_file = config.map(File::new).unwrap_or_else(|| layout.settings_file());
    let settings = Settings::load(&settings_file).await?;
    Ok(ConsoleOptions::from_settings(&settings, &layout, backend_url))
}

/// Write default settings unless a file already exists; returns its path
pub async fn init_settings(config: Option<PathBuf>) -> Result<PathBuf, ConsoleError> {
    let file = config
        .map(File::new)
        .unwrap_or_else(|| StorageLayout::default().settings_file());
    if file.exists().await {
        return Err(ConsoleError::ConfigError(format!(
            "{} already exists",
            file.path().display()
        )));
    }
    file.write_json(&Settings::default()).await?;
    Ok(file.path().to_path_buf())
}

/// Build a console talking to the configured backend
pub fn connect(options: &ConsoleOptions) -> Result<Console, ConsoleError> {
    let http_client = HttpClient::new(&options.backend_base_url, options.request_timeout)?;
    info!("Using backend at {}", http_client.base_url());
    Ok(Console::new(Arc::new(http_client), options.dispatcher.clone()))
}
