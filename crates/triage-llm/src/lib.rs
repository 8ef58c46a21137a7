//! triage-llm
//!
//! Language-model triage classification with a deterministic keyword
//! fallback. Backends: OpenAI Chat Completions and Bedrock Converse.

pub mod backend;
pub mod bedrock;
pub mod classifier;
pub mod error;
pub mod openai;
pub mod parse;
pub mod prompt;
