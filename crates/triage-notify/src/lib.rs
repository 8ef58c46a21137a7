//! triage-notify
//!
//! High-urgency alerts published to an SNS topic.

pub mod error;
pub mod retry;
pub mod sns;
