//! Per-message triage decision.
//!
//! Folds one triage result into the conversation and picks the reply. There
//! is no state machine beyond this: the only state carried between messages
//! is the conversation record itself.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::conversation::{Conversation, HistoryEntry};
use crate::models::triage::{TriageResult, Urgency};

pub const EMERGENCY_REPLY: &str = "Based on the symptoms you described, it may be an emergency. \
Please call your local emergency number or visit the nearest emergency room immediately.";

pub const SCHEDULING_REPLY: &str = "Thanks for providing more details. It sounds like your situation \
is not urgent, but we would like to schedule an appointment. Please reply with your name and a \
preferred day/time for a call or visit.";

pub const SELF_CARE_REPLY: &str = "It appears your symptoms are mild. Here are some general self-care \
tips: rest, stay hydrated and monitor your symptoms. If they worsen or new symptoms appear, please \
contact a healthcare professional.";

/// Alert raised for a HIGH urgency message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub subject: String,
    pub message: String,
}

/// Outcome of [`decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub reply: String,
    pub alert: Option<Alert>,
}

/// Apply `result` to `conversation` and choose the reply.
///
/// Appends exactly one history entry stamped with `now`, sets `triage_level`
/// to this message's urgency and `last_intent` to the branch taken.
pub fn decide(
    result: &TriageResult,
    conversation: &mut Conversation,
    message: &str,
    user_id: &str,
    now: jiff::Timestamp,
) -> Decision {
    let urgency = result.urgency;

    conversation.history.push(HistoryEntry {
        timestamp: now.as_second(),
        message: message.to_string(),
    });
    conversation.triage_level = Some(urgency);
    conversation.last_intent = Some(urgency.intent().to_string());

    match urgency {
        Urgency::High => Decision {
            reply: EMERGENCY_REPLY.to_string(),
            alert: Some(high_urgency_alert(result, user_id)),
        },
        Urgency::Medium => Decision {
            reply: SCHEDULING_REPLY.to_string(),
            alert: None,
        },
        Urgency::Low => Decision {
            reply: SELF_CARE_REPLY.to_string(),
            alert: None,
        },
    }
}

fn high_urgency_alert(result: &TriageResult, user_id: &str) -> Alert {
    let fields = json!({
        "symptoms": result.symptoms,
        "duration": result.duration,
        "age": result.age,
        "red_flags": result.red_flags,
        "urgency": result.urgency,
    });
    Alert {
        subject: format!("High urgency triage alert for user {user_id}"),
        message: format!(
            "User {user_id} has reported symptoms requiring immediate attention.\n\
             Extracted fields: {fields:#}\n\n\
             Please contact the patient as soon as possible."
        ),
    }
}
