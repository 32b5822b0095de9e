//! Whole-file JSON documents on disk

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::debug;

use crate::errors::ConsoleError;

/// A JSON document the console reads and writes in one piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False when the path is missing or cannot be inspected
    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Parse the document; syntax errors name the offending path
    pub async fn read_json<T: DeserializeOwned>(&self) -> Result<T, ConsoleError> {
        let raw = fs::read_to_string(&self.path).await?;
        serde_json::from_str(&raw).map_err(|e| {
            ConsoleError::ConfigError(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Write pretty JSON via a sibling temp file and a rename, creating parents
    pub async fn write_json<T: Serialize>(&self, value: &T) -> Result<(), ConsoleError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut contents = serde_json::to_string_pretty(value)?;
        contents.push('\n');

        let staging = self.path.with_extension("tmp");
        fs::write(&staging, contents).await?;
        fs::rename(&staging, &self.path).await?;
        debug!("Wrote {}", self.path.display());
        Ok(())
    }
}
