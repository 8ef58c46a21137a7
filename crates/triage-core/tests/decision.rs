use triage_core::decision::{EMERGENCY_REPLY, SCHEDULING_REPLY, SELF_CARE_REPLY, decide};
use triage_core::models::conversation::{Conversation, HistoryEntry};
use triage_core::models::triage::{TriageResult, Urgency};

fn ts(seconds: i64) -> jiff::Timestamp {
    jiff::Timestamp::from_second(seconds).unwrap()
}

fn result(urgency: Urgency) -> TriageResult {
    TriageResult {
        symptoms: vec!["chest pain".to_string()],
        duration: "2 hours".to_string(),
        age: "54".to_string(),
        red_flags: vec!["radiating pain".to_string()],
        urgency,
    }
}

#[test]
fn high_urgency_raises_one_alert_and_emergency_reply() {
    let mut conversation = Conversation::new("+123", ts(1_700_000_000));
    let decision = decide(
        &result(Urgency::High),
        &mut conversation,
        "I have severe chest pain.",
        "+123",
        ts(1_700_000_060),
    );

    assert_eq!(decision.reply, EMERGENCY_REPLY);
    assert!(decision.reply.to_lowercase().contains("emergency"));

    let alert = decision.alert.expect("HIGH must alert");
    assert!(alert.subject.contains("+123"));
    assert!(alert.message.contains("\"urgency\": \"HIGH\""));
    assert!(alert.message.contains("radiating pain"));
    assert!(alert.message.contains("Please contact the patient"));

    assert_eq!(conversation.triage_level, Some(Urgency::High));
    assert_eq!(conversation.last_intent.as_deref(), Some("emergency"));
    assert_eq!(
        conversation.history,
        vec![HistoryEntry {
            timestamp: 1_700_000_060,
            message: "I have severe chest pain.".to_string(),
        }]
    );
}

#[test]
fn medium_urgency_asks_for_scheduling() {
    let mut conversation = Conversation::new("+123", ts(0));
    let decision = decide(&result(Urgency::Medium), &mut conversation, "fever", "+123", ts(10));

    assert!(decision.alert.is_none());
    assert_eq!(decision.reply, SCHEDULING_REPLY);
    assert!(decision.reply.contains("day/time"));
    assert_eq!(conversation.last_intent.as_deref(), Some("schedule_appointment"));
}

#[test]
fn low_urgency_gives_self_care() {
    let mut conversation = Conversation::new("+123", ts(0));
    let decision = decide(&result(Urgency::Low), &mut conversation, "headache", "+123", ts(10));

    assert!(decision.alert.is_none());
    assert_eq!(decision.reply, SELF_CARE_REPLY);
    assert!(decision.reply.contains("stay hydrated"));
    assert_eq!(conversation.last_intent.as_deref(), Some("self_care"));
}

#[test]
fn each_message_appends_exactly_one_entry() {
    let mut conversation = Conversation::new("+123", ts(0));
    for (i, urgency) in [Urgency::Low, Urgency::High, Urgency::Medium].into_iter().enumerate() {
        let before = conversation.history.len();
        decide(&result(urgency), &mut conversation, "msg", "+123", ts(i as i64));
        assert_eq!(conversation.history.len(), before + 1);
    }
}

#[test]
fn triage_level_tracks_latest_message_only() {
    let mut conversation = Conversation::new("+123", ts(0));
    decide(&result(Urgency::High), &mut conversation, "chest pain", "+123", ts(1));
    decide(&result(Urgency::Low), &mut conversation, "feeling better", "+123", ts(2));

    assert_eq!(conversation.triage_level, Some(Urgency::Low));
    assert_eq!(conversation.history.len(), 2);
    assert_eq!(conversation.history[1].message, "feeling better");
}

#[test]
fn created_at_is_untouched() {
    let mut conversation = Conversation::new("+123", ts(100));
    decide(&result(Urgency::Low), &mut conversation, "hi", "+123", ts(200));
    assert_eq!(conversation.created_at, ts(100));
}

#[test]
fn alert_embeds_triage_fields_as_json() {
    let mut conversation = Conversation::new("+123", ts(1_700_000_000));
    let decision = decide(
        &result(Urgency::High),
        &mut conversation,
        "I have severe chest pain.",
        "+123",
        ts(1_700_000_060),
    );
    let message = decision.alert.unwrap().message;

    let start = message.find('{').unwrap();
    let end = message.rfind('}').unwrap();
    let fields: serde_json::Value = serde_json::from_str(&message[start..=end]).unwrap();

    assert_eq!(fields["urgency"], "HIGH");
    assert_eq!(fields["duration"], "2 hours");
    assert_eq!(fields["symptoms"][0], "chest pain");
    assert!(fields["red_flags"].is_array());
    assert!(message.ends_with("Please contact the patient as soon as possible."));
}
