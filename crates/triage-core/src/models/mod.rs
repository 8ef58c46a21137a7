pub mod conversation;
pub mod triage;
