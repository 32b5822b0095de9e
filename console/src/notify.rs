//! Operator-visible notifications

use std::collections::VecDeque;

use crate::errors::{ConsoleError, ErrorKind};

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A transient message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            description: None,
        }
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Error notification titled after where `err` came from
    pub fn from_error(context: &str, err: &ConsoleError) -> Self {
        let title = match err.kind() {
            ErrorKind::Local => format!("{}: invalid input", context),
            ErrorKind::Transport => format!("{}: backend unreachable", context),
            ErrorKind::Backend => format!("{}: backend error", context),
            ErrorKind::Internal => format!("{}: internal error", context),
        };
        Self::error(title, err.to_string())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Notifications waiting to be rendered, oldest first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, notification: Notification) {
        self.pending.push_back(notification);
    }

    /// Take everything queued so far
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
