//! Strict parsing of model output into a [`TriageResult`].

use serde::Deserialize;

use triage_core::models::triage::{TriageResult, Urgency};

use crate::error::LlmError;

/// Shape the model is instructed to return. Every field but `urgency` is
/// required; a reply missing one is a schema violation.
#[derive(Deserialize)]
struct ModelTriage {
    symptoms: Vec<String>,
    duration: String,
    age: String,
    red_flags: Vec<String>,
    #[serde(default)]
    urgency: Option<serde_json::Value>,
}

/// Parse a model reply. `urgency` defaults to LOW when absent, not a string,
/// or not one of the three levels.
pub fn parse_triage(text: &str) -> Result<TriageResult, LlmError> {
    let json = strip_code_fence(text);
    let raw: ModelTriage = serde_json::from_str(json).map_err(|e| {
        LlmError::SchemaViolation(format!("failed to parse triage output: {e}. Response: {text}"))
    })?;

    let urgency = raw
        .urgency
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<Urgency>().ok())
        .unwrap_or(Urgency::Low);

    Ok(TriageResult {
        symptoms: raw.symptoms,
        duration: raw.duration,
        age: raw.age,
        red_flags: raw.red_flags,
        urgency,
    })
}

/// Models sometimes wrap JSON in a Markdown fence despite instructions.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
