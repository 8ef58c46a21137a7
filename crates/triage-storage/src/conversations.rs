//! Conversation records in a DynamoDB table keyed by `user_id`.
//!
//! Item layout:
//!
//! | attribute      | type | notes                                   |
//! |----------------|------|-----------------------------------------|
//! | `user_id`      | S    | partition key                           |
//! | `history`      | L    | of M `{timestamp: N, message: S}`       |
//! | `last_intent`  | S    | omitted when unset                      |
//! | `triage_level` | S    | `LOW` / `MEDIUM` / `HIGH`, omitted when unset |
//! | `created_at`   | S    | RFC 3339                                |
//! | `updated_at`   | S    | RFC 3339                                |

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use triage_core::error::CoreError;
use triage_core::models::conversation::{Conversation, HistoryEntry};
use triage_core::traits::ConversationStore;

use crate::error::StorageError;

pub type Item = HashMap<String, AttributeValue>;

const USER_ID: &str = "user_id";
const HISTORY: &str = "history";
const LAST_INTENT: &str = "last_intent";
const TRIAGE_LEVEL: &str = "triage_level";
const CREATED_AT: &str = "created_at";
const UPDATED_AT: &str = "updated_at";
const TIMESTAMP: &str = "timestamp";
const MESSAGE: &str = "message";

#[derive(Clone)]
pub struct ConversationTable {
    client: Client,
    table_name: String,
}

impl ConversationTable {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub async fn get_conversation(
        &self,
        user_id: &str,
    ) -> Result<Option<Conversation>, StorageError> {
        let resp = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(USER_ID, AttributeValue::S(user_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| StorageError::GetItem(e.into_service_error().to_string()))?;

        resp.item().map(from_item).transpose()
    }

    /// Unconditional PutItem: replaces any existing record for the user.
    pub async fn put_conversation(&self, conversation: &Conversation) -> Result<(), StorageError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(conversation)))
            .send()
            .await
            .map_err(|e| StorageError::PutItem(e.into_service_error().to_string()))?;

        debug!(
            table = %self.table_name,
            user_id = %conversation.user_id,
            history_len = conversation.history.len(),
            "conversation stored"
        );
        Ok(())
    }
}

#[async_trait]
impl ConversationStore for ConversationTable {
    async fn get(&self, user_id: &str) -> Result<Option<Conversation>, CoreError> {
        self.get_conversation(user_id)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))
    }

    async fn put(&self, conversation: &Conversation) -> Result<(), CoreError> {
        self.put_conversation(conversation)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))
    }
}

pub fn to_item(conversation: &Conversation) -> Item {
    let history = conversation
        .history
        .iter()
        .map(|entry| {
            AttributeValue::M(HashMap::from([
                (TIMESTAMP.to_string(), AttributeValue::N(entry.timestamp.to_string())),
                (MESSAGE.to_string(), AttributeValue::S(entry.message.clone())),
            ]))
        })
        .collect();

    let mut item = HashMap::from([
        (USER_ID.to_string(), AttributeValue::S(conversation.user_id.clone())),
        (HISTORY.to_string(), AttributeValue::L(history)),
        (
            CREATED_AT.to_string(),
            AttributeValue::S(conversation.created_at.to_string()),
        ),
        (
            UPDATED_AT.to_string(),
            AttributeValue::S(conversation.updated_at.to_string()),
        ),
    ]);

    if let Some(intent) = &conversation.last_intent {
        item.insert(LAST_INTENT.to_string(), AttributeValue::S(intent.clone()));
    }
    if let Some(level) = conversation.triage_level {
        item.insert(
            TRIAGE_LEVEL.to_string(),
            AttributeValue::S(level.as_str().to_string()),
        );
    }

    item
}

/// Decode a stored item. A missing `history` reads as empty; a NULL
/// `last_intent`/`triage_level` reads as unset.
pub fn from_item(item: &Item) -> Result<Conversation, StorageError> {
    let history = match item.get(HISTORY) {
        None | Some(AttributeValue::Null(_)) => Vec::new(),
        Some(value) => value
            .as_l()
            .map_err(|_| malformed(HISTORY, "expected a list"))?
            .iter()
            .map(history_entry)
            .collect::<Result<_, _>>()?,
    };

    let triage_level = optional_string(item, TRIAGE_LEVEL)?
        .map(|s| {
            s.parse()
                .map_err(|e: triage_core::models::triage::ParseUrgencyError| {
                    malformed(TRIAGE_LEVEL, e.to_string())
                })
        })
        .transpose()?;

    Ok(Conversation {
        user_id: required_string(item, USER_ID)?.to_string(),
        history,
        last_intent: optional_string(item, LAST_INTENT)?.map(str::to_string),
        triage_level,
        created_at: timestamp(item, CREATED_AT)?,
        updated_at: timestamp(item, UPDATED_AT)?,
    })
}

fn history_entry(value: &AttributeValue) -> Result<HistoryEntry, StorageError> {
    let entry = value
        .as_m()
        .map_err(|_| malformed(HISTORY, "entry is not a map"))?;

    let timestamp = entry
        .get(TIMESTAMP)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| malformed(HISTORY, "entry without numeric timestamp"))?
        .parse::<i64>()
        .map_err(|e| malformed(HISTORY, e.to_string()))?;

    let message = entry
        .get(MESSAGE)
        .and_then(|v| v.as_s().ok())
        .ok_or_else(|| malformed(HISTORY, "entry without message"))?
        .clone();

    Ok(HistoryEntry { timestamp, message })
}

fn required_string<'a>(item: &'a Item, field: &'static str) -> Result<&'a str, StorageError> {
    optional_string(item, field)?.ok_or_else(|| malformed(field, "missing"))
}

fn optional_string<'a>(
    item: &'a Item,
    field: &'static str,
) -> Result<Option<&'a str>, StorageError> {
    match item.get(field) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(value) => value
            .as_s()
            .map(|s| Some(s.as_str()))
            .map_err(|_| malformed(field, "expected a string")),
    }
}

fn timestamp(item: &Item, field: &'static str) -> Result<jiff::Timestamp, StorageError> {
    required_string(item, field)?
        .parse()
        .map_err(|e: jiff::Error| malformed(field, e.to_string()))
}

fn malformed(field: &'static str, reason: impl Into<String>) -> StorageError {
    StorageError::MalformedItem {
        field,
        reason: reason.into(),
    }
}
