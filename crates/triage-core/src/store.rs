//! Conversation load/save on top of a [`ConversationStore`].

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::models::conversation::Conversation;
use crate::traits::ConversationStore;

/// Load the conversation for `user_id`, or start a new one.
///
/// Lookup failures are logged and treated exactly like a missing record.
pub async fn load(
    store: &dyn ConversationStore,
    user_id: &str,
    now: jiff::Timestamp,
) -> Conversation {
    match store.get(user_id).await {
        Ok(Some(conversation)) => conversation,
        Ok(None) => {
            debug!(user_id, "no stored conversation, starting a new one");
            Conversation::new(user_id, now)
        }
        Err(e) => {
            warn!(user_id, error = %e, "conversation lookup failed, starting a new one");
            Conversation::new(user_id, now)
        }
    }
}

/// Stamp `updated_at` and upsert. Last writer wins.
pub async fn save(
    store: &dyn ConversationStore,
    conversation: &mut Conversation,
    now: jiff::Timestamp,
) -> Result<(), CoreError> {
    conversation.updated_at = now;
    store.put(conversation).await
}
