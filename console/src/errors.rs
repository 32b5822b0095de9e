//! Error types for the console

use thiserror::Error;

/// Where an error originated, as presented to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any request was sent
    Local,

    /// No response was obtained
    Transport,

    /// The backend answered with a failure
    Backend,

    /// Startup, configuration or I/O problems
    Internal,
}

/// Main error type for the console
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("Microservice '{0}' already has an action in flight")]
    Busy(String),

    #[error("Action '{action}' is not available while '{id}' is {status}")]
    ActionUnavailable {
        id: String,
        action: String,
        status: String,
    },

    #[error("Microservice '{0}' is not running")]
    NotRunning(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Classify the error for presentation
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConsoleError::Validation(_)
            | ConsoleError::Busy(_)
            | ConsoleError::ActionUnavailable { .. }
            | ConsoleError::NotRunning(_)
            | ConsoleError::NotFound(_) => ErrorKind::Local,
            ConsoleError::Transport(_) => ErrorKind::Transport,
            ConsoleError::Backend { .. } => ErrorKind::Backend,
            ConsoleError::IoError(_)
            | ConsoleError::JsonError(_)
            | ConsoleError::UrlError(_)
            | ConsoleError::ConfigError(_)
            | ConsoleError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True if the error never reached the network
    pub fn is_local(&self) -> bool {
        self.kind() == ErrorKind::Local
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::Validation(message.into())
    }
}

impl From<anyhow::Error> for ConsoleError {
    fn from(err: anyhow::Error) -> Self {
        ConsoleError::Internal(err.to_string())
    }
}
