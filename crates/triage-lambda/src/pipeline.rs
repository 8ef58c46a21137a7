//! Per-request triage pipeline.
//!
//! verify signature → validate fields → load conversation → classify →
//! decide → save conversation → (alert ‖ upload transcript) → render TwiML.
//!
//! Only the first two steps can reject a request. Every later step either
//! cannot fail or logs its failure and lets the reply go out. The alert runs
//! under [`ALERT_BUDGET`] so a hung topic cannot hold the reply past the
//! provider's webhook deadline.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use triage_core::decision::{Alert, decide};
use triage_core::models::conversation::Conversation;
use triage_core::signature::{self, FormParams};
use triage_core::{store, twiml};

use crate::state::AppState;

/// Upper bound on alert delivery, retries included.
pub const ALERT_BUDGET: Duration = Duration::from_secs(5);

/// An inbound webhook call, already decoded from HTTP.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    /// Public URL the provider signed.
    pub url: String,
    pub signature: String,
    pub params: FormParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Missing From or Body parameter")]
    MissingFields,
}

/// Run the pipeline for one request and return the TwiML reply.
pub async fn process(state: &AppState, request: &WebhookRequest) -> Result<String, Rejection> {
    if !signature::verify(
        &request.signature,
        &request.url,
        &request.params,
        &state.auth_token,
    ) {
        warn!(url = %request.url, "invalid webhook signature");
        return Err(Rejection::InvalidSignature);
    }

    let user_id = request.params.get("From").unwrap_or_default().trim();
    let message = request.params.get("Body").unwrap_or_default().trim();
    if user_id.is_empty() || message.is_empty() {
        return Err(Rejection::MissingFields);
    }

    let now = jiff::Timestamp::now();
    let mut conversation = match &state.conversations {
        Some(conversations) => store::load(conversations.as_ref(), user_id, now).await,
        None => Conversation::new(user_id, now),
    };

    let result = state
        .classifier
        .classify(message, &conversation.history)
        .await;
    let decision = decide(&result, &mut conversation, message, user_id, now);

    info!(
        user_id,
        urgency = %result.urgency,
        history_len = conversation.history.len(),
        alert = decision.alert.is_some(),
        "message triaged"
    );

    if let Some(conversations) = &state.conversations
        && let Err(e) =
            store::save(conversations.as_ref(), &mut conversation, jiff::Timestamp::now()).await
    {
        warn!(user_id, error = %e, "failed to save conversation");
    }

    tokio::join!(
        async {
            if let Some(alert) = &decision.alert {
                send_alert(state, user_id, alert).await;
            }
        },
        upload_transcript(state, user_id, &conversation),
    );

    Ok(twiml::render(&decision.reply))
}

async fn upload_transcript(state: &AppState, user_id: &str, conversation: &Conversation) {
    if let Some(transcripts) = &state.transcripts
        && let Err(e) = transcripts
            .put_transcript(user_id, &conversation.transcript(), jiff::Timestamp::now())
            .await
    {
        warn!(user_id, error = %e, "failed to upload transcript");
    }
}

async fn send_alert(state: &AppState, user_id: &str, alert: &Alert) {
    match &state.alerts {
        Some(alerts) => match tokio::time::timeout(ALERT_BUDGET, alerts.notify(alert)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(user_id, error = %e, "failed to deliver high urgency alert");
            }
            Err(_) => {
                warn!(
                    user_id,
                    budget_ms = ALERT_BUDGET.as_millis() as u64,
                    "high urgency alert timed out"
                );
            }
        },
        None => {
            warn!(
                user_id,
                subject = %alert.subject,
                "no alert topic configured, high urgency alert not delivered"
            );
        }
    }
}
