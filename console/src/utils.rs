//! Utility functions

use serde::{Deserialize, Serialize};

/// Version information for the console
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
    pub profile: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("MSCONSOLE_GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("MSCONSOLE_BUILD_TIME").unwrap_or("unknown").to_string(),
        profile: option_env!("MSCONSOLE_BUILD_PROFILE").unwrap_or("unknown").to_string(),
    }
}

/// Shorten `text` to at most `max` characters, marking the cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
