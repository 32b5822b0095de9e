//! Storage layout configuration

use std::path::PathBuf;

use crate::filesys::file::File;

/// Where the console keeps its configuration and logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    /// Base directory for all storage
    pub base_dir: PathBuf,
}

impl StorageLayout {
    /// Create a new storage layout
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Get the settings file path
    pub fn settings_file(&self) -> File {
        File::new(self.base_dir.join("settings.json"))
    }

    /// Get the logs directory
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }
}

impl Default for StorageLayout {
    /// `$XDG_CONFIG_HOME/msconsole`, else `$HOME/.config/msconsole`, else `./.msconsole`
    fn default() -> Self {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .map(|config| config.join("msconsole"))
            .unwrap_or_else(|| PathBuf::from(".msconsole"));
        Self::new(base)
    }
}
