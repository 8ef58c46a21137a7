//! Seams to the external collaborators of the triage pipeline.
//!
//! Production implementations live in the AWS-backed crates; tests plug in
//! in-memory fakes.

use async_trait::async_trait;

use crate::decision::Alert;
use crate::error::CoreError;
use crate::models::conversation::{Conversation, HistoryEntry};
use crate::models::triage::TriageResult;

/// Durable conversation records keyed by user id.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Fetch the record for `user_id`, `Ok(None)` when there is none.
    async fn get(&self, user_id: &str) -> Result<Option<Conversation>, CoreError>;

    /// Unconditional upsert keyed by `conversation.user_id`.
    async fn put(&self, conversation: &Conversation) -> Result<(), CoreError>;
}

/// Write-only transcript storage.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Store a transcript snapshot for `user_id` taken at `at`. Returns the
    /// object key written.
    async fn put_transcript(
        &self,
        user_id: &str,
        transcript: &str,
        at: jiff::Timestamp,
    ) -> Result<String, CoreError>;
}

/// Outbound channel for high-urgency alerts.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn notify(&self, alert: &Alert) -> Result<(), CoreError>;
}

/// Turns a message into a triage result. Infallible: implementations recover
/// from their own failures.
#[async_trait]
pub trait TriageClassifier: Send + Sync {
    async fn classify(&self, message: &str, history: &[HistoryEntry]) -> TriageResult;
}
