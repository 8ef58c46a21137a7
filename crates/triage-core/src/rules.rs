//! Deterministic keyword classifier.
//!
//! Used whenever the language-model path is unavailable or fails. The
//! keyword tables and their priority are fixed: any HIGH keyword wins before
//! the MEDIUM table is consulted.

use async_trait::async_trait;

use crate::models::conversation::HistoryEntry;
use crate::models::triage::{TriageResult, Urgency};
use crate::traits::TriageClassifier;

pub const HIGH_URGENCY_KEYWORDS: [&str; 4] = [
    "chest pain",
    "shortness of breath",
    "fainting",
    "unconscious",
];

pub const MEDIUM_URGENCY_KEYWORDS: [&str; 4] = ["fever", "vomit", "infection", "severe pain"];

/// Urgency from substring matches on the lower-cased message.
pub fn keyword_urgency(message: &str) -> Urgency {
    let text = message.to_lowercase();
    if HIGH_URGENCY_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        Urgency::High
    } else if MEDIUM_URGENCY_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

/// Full fallback result: the raw message is the only symptom and nothing
/// else is extracted.
pub fn classify_by_keywords(message: &str) -> TriageResult {
    TriageResult {
        symptoms: vec![message.to_string()],
        duration: String::new(),
        age: String::new(),
        red_flags: Vec::new(),
        urgency: keyword_urgency(message),
    }
}

/// [`TriageClassifier`] that only ever applies the keyword rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

#[async_trait]
impl TriageClassifier for KeywordClassifier {
    async fn classify(&self, message: &str, _history: &[HistoryEntry]) -> TriageResult {
        classify_by_keywords(message)
    }
}
