//! API models

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Implementation language of a microservice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Microservice status as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicroserviceStatus {
    Running,
    Stopped,
    Exited,
    Error,

    /// Any status this console does not know about
    #[serde(other)]
    Unknown,
}

impl MicroserviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MicroserviceStatus::Running => "running",
            MicroserviceStatus::Stopped => "stopped",
            MicroserviceStatus::Exited => "exited",
            MicroserviceStatus::Error => "error",
            MicroserviceStatus::Unknown => "unknown",
        }
    }

    pub fn is_running(&self) -> bool {
        *self == MicroserviceStatus::Running
    }
}

impl std::fmt::Display for MicroserviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A microservice as listed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Microservice {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub language: Language,
    pub status: MicroserviceStatus,
    #[serde(default)]
    pub endpoint: String,

    /// Whether invocations need a Roble project context
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_roble: bool,

    /// Source code, only present on some backends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default)]
    pub created_at: String,
}

impl Microservice {
    /// Best-effort parse of `createdAt` for display.
    ///
    /// Accepts RFC 3339 stamps and naive ISO-8601 stamps without an offset.
    pub fn created_at_parsed(&self) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.created_at) {
            return Some(dt.naive_local());
        }
        NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

/// Source code preload for the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroserviceCode {
    pub name: String,
    pub code: String,

    /// Missing flags fall back to `true`
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_roble: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

/// Create or update request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroserviceRequest {
    pub name: String,
    pub code: String,
    pub language: Language,
    pub is_roble: bool,
}

/// Acknowledgement returned by lifecycle actions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionAck {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Extract the `error` message from a raw body, if any
    pub fn message_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.error)
            .filter(|m| !m.is_empty())
    }
}

/// Body posted to a microservice endpoint when testing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationEnvelope {
    pub project_id: String,
    pub payload: serde_json::Value,
}

fn default_true() -> bool {
    true
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}
