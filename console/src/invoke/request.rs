//! Building the outbound test request

use console_api::{InvocationEnvelope, Microservice};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::errors::ConsoleError;
use crate::invoke::bearer::normalize_bearer;

pub const INVALID_PAYLOAD: &str = "payload must be valid JSON";
pub const MISSING_PROJECT: &str = "this Roble microservice requires a project identifier";
pub const MISSING_TARGET: &str = "select a microservice to test";

/// What the operator entered in the test panel
#[derive(Debug, Clone, Default)]
pub struct InvocationDraft {
    /// JSON payload text; blank means `{}`
    pub payload: String,

    /// Roble project context
    pub project_id: String,

    /// Bearer credential as pasted, with or without the `Bearer ` prefix
    pub token: Option<SecretString>,
}

/// A validated test request, ready to send
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub target_id: String,
    pub endpoint: Url,
    pub authorization: Option<SecretString>,
    pub envelope: InvocationEnvelope,
}

impl InvocationRequest {
    /// Validate `draft` against the freshly read `target`.
    ///
    /// Every failure here is local; nothing has been sent yet. The endpoint
    /// is only looked at once the target is known to be running.
    pub fn build(
        draft: &InvocationDraft,
        target: Option<&Microservice>,
    ) -> Result<Self, ConsoleError> {
        let target = target.ok_or_else(|| ConsoleError::validation(MISSING_TARGET))?;
        if !target.status.is_running() {
            return Err(ConsoleError::NotRunning(target.id.clone()));
        }

        let project_id = draft.project_id.trim();
        if target.is_roble && project_id.is_empty() {
            return Err(ConsoleError::validation(MISSING_PROJECT));
        }

        let payload = parse_payload(&draft.payload)?;

        let endpoint = Url::parse(&target.endpoint).map_err(|e| {
            ConsoleError::validation(format!("invalid endpoint '{}': {}", target.endpoint, e))
        })?;

        let authorization = if target.is_roble {
            draft
                .token
                .as_ref()
                .map(|token| normalize_bearer(token.expose_secret()))
                .filter(|value| !value.is_empty())
                .map(SecretString::from)
        } else {
            None
        };

        let project_id = if target.is_roble {
            project_id.to_string()
        } else {
            String::new()
        };

        Ok(Self {
            target_id: target.id.clone(),
            endpoint,
            authorization,
            envelope: InvocationEnvelope {
                project_id,
                payload,
            },
        })
    }
}

/// Parse operator payload text; blank text is an empty object
pub fn parse_payload(text: &str) -> Result<serde_json::Value, ConsoleError> {
    if text.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(text).map_err(|_| ConsoleError::validation(INVALID_PAYLOAD))
}
