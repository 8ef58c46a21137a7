use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Medical urgency of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "LOW",
            Urgency::Medium => "MEDIUM",
            Urgency::High => "HIGH",
        }
    }

    /// Tag recorded as the conversation's `last_intent` after a decision at
    /// this urgency.
    pub fn intent(&self) -> &'static str {
        match self {
            Urgency::Low => "self_care",
            Urgency::Medium => "schedule_appointment",
            Urgency::High => "emergency",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized urgency: {0:?}")]
pub struct ParseUrgencyError(pub String);

/// Case-insensitive; surrounding whitespace is ignored.
impl FromStr for Urgency {
    type Err = ParseUrgencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Urgency::Low),
            "MEDIUM" => Ok(Urgency::Medium),
            "HIGH" => Ok(Urgency::High),
            _ => Err(ParseUrgencyError(s.to_string())),
        }
    }
}

/// Structured extraction for one inbound message.
///
/// Only `urgency` (as the conversation's `triage_level`) outlives the request;
/// the full result is embedded in HIGH alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub symptoms: Vec<String>,
    pub duration: String,
    pub age: String,
    pub red_flags: Vec<String>,
    pub urgency: Urgency,
}
