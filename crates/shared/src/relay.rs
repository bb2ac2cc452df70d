//! Adventure socket relay messages.
//!
//! The relay is best-effort broadcast: messages from one member of an
//! adventure room are forwarded to the other members with no ordering or
//! convergence guarantees.

use serde::{Deserialize, Serialize};

/// Name shown for cursor updates that carry no user name.
pub const ANONYMOUS_USER: &str = "Anonymous";

/// Messages from an editor to the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RelayClientMessage {
    JoinAdventure {
        adventure_id: String,
    },
    LeaveAdventure {
        adventure_id: String,
    },
    ContentChange {
        adventure_id: String,
        content: serde_json::Value,
    },
    CursorPosition {
        adventure_id: String,
        position: serde_json::Value,
        #[serde(default)]
        user_name: Option<String>,
    },
}

impl RelayClientMessage {
    pub fn adventure_id(&self) -> &str {
        match self {
            RelayClientMessage::JoinAdventure { adventure_id }
            | RelayClientMessage::LeaveAdventure { adventure_id }
            | RelayClientMessage::ContentChange { adventure_id, .. }
            | RelayClientMessage::CursorPosition { adventure_id, .. } => adventure_id,
        }
    }
}

/// Messages from the relay to the other members of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RelayServerMessage {
    ContentChange {
        content: serde_json::Value,
        user_id: String,
        /// RFC 3339
        timestamp: String,
    },
    CursorPosition {
        position: serde_json::Value,
        user_id: String,
        user_name: String,
    },
    /// Sent back to the sender only, when its message could not be parsed
    Error {
        message: String,
    },
}
