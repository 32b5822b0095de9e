//! Lifecycle actions and their availability

use console_api::MicroserviceStatus;
use serde::{Deserialize, Serialize};

/// A lifecycle command against a microservice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Restart,
    Stop,
    Delete,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::Restart, ActionKind::Stop, ActionKind::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Restart => "restart",
            ActionKind::Stop => "stop",
            ActionKind::Delete => "delete",
        }
    }

    /// Whether the action may be issued while the entity is in `status`
    pub fn is_available(&self, status: MicroserviceStatus) -> bool {
        match self {
            ActionKind::Restart => matches!(
                status,
                MicroserviceStatus::Running | MicroserviceStatus::Stopped | MicroserviceStatus::Exited
            ),
            ActionKind::Stop => status == MicroserviceStatus::Running,
            ActionKind::Delete => true,
        }
    }

    /// Actions offered for an entity in `status`, in display order
    pub fn available_for(status: MicroserviceStatus) -> Vec<ActionKind> {
        Self::ALL
            .into_iter()
            .filter(|action| action.is_available(status))
            .collect()
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "restart" | "start" => Ok(ActionKind::Restart),
            "stop" => Ok(ActionKind::Stop),
            "delete" | "rm" => Ok(ActionKind::Delete),
            _ => Err(format!("Invalid action: {}", s)),
        }
    }
}
