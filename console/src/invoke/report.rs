//! Turning an invocation result into something to show

use console_api::ErrorResponse;

use crate::errors::ConsoleError;
use crate::http::client::RawResponse;
use crate::notify::Notification;

/// Outcome of a test call as presented to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationReport {
    /// HTTP status, absent when no response arrived
    pub status: Option<u16>,

    /// Response body, pretty-printed when it is JSON
    pub body: String,

    pub notification: Notification,
}

impl InvocationReport {
    /// Report for a response of any status
    pub fn from_response(response: &RawResponse) -> Self {
        let body = pretty_body(&response.body);
        let notification = if response.is_success() {
            Notification::info("Test succeeded")
        } else {
            let message = ErrorResponse::message_from_body(&response.body)
                .unwrap_or_else(|| format!("Status: {}", response.status));
            Notification::error("Test returned an error", message)
        };

        Self {
            status: Some(response.status),
            body,
            notification,
        }
    }

    /// Report for a call that produced no response
    pub fn from_transport_error(err: &ConsoleError) -> Self {
        let message = err.to_string();
        let body = serde_json::to_string_pretty(&serde_json::json!({ "error": message }))
            .unwrap_or_else(|_| message.clone());

        Self {
            status: None,
            body,
            notification: Notification::error("Test failed", message),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.notification.is_error()
    }
}

/// Pretty-print JSON bodies; anything else is returned as received
pub fn pretty_body(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| raw.to_string())
}
