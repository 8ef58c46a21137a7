use serde::{Deserialize, Serialize};

use super::triage::Urgency;

/// Durable per-user triage state, keyed by `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub user_id: String,
    /// Chronological, append-only.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triage_level: Option<Urgency>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// A single inbound message as recorded in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Epoch seconds.
    pub timestamp: i64,
    pub message: String,
}

impl Conversation {
    /// A conversation for a user we have not heard from before.
    pub fn new(user_id: impl Into<String>, now: jiff::Timestamp) -> Self {
        Self {
            user_id: user_id.into(),
            history: Vec::new(),
            last_intent: None,
            triage_level: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Plain-text transcript of the full history, one `"<timestamp>: <message>"`
    /// line per entry.
    pub fn transcript(&self) -> String {
        self.history
            .iter()
            .map(|entry| format!("{}: {}", entry.timestamp, entry.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
