//! Triage classification: language model first, keyword rules on any failure.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use triage_core::models::conversation::HistoryEntry;
use triage_core::models::triage::TriageResult;
use triage_core::rules::classify_by_keywords;
use triage_core::traits::TriageClassifier;

use crate::backend::ChatBackend;
use crate::error::LlmError;
use crate::parse::parse_triage;
use crate::prompt::TRIAGE_SYSTEM_PROMPT;

/// Provider named by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Bedrock,
    /// Any unrecognized name: keyword rules only.
    Keywords,
}

impl ProviderKind {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => ProviderKind::OpenAi,
            "bedrock" => ProviderKind::Bedrock,
            _ => ProviderKind::Keywords,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Bedrock => "bedrock",
            ProviderKind::Keywords => "keywords",
        })
    }
}

/// [`TriageClassifier`] backed by an optional chat model.
///
/// Without a backend every message goes straight to the keyword rules.
/// With one, any invocation or parse failure is logged and the keyword
/// rules answer instead, so classification never fails.
#[derive(Clone, Default)]
pub struct LlmClassifier {
    backend: Option<Arc<dyn ChatBackend>>,
}

impl LlmClassifier {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn keywords_only() -> Self {
        Self { backend: None }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.as_ref().map_or("keywords", |b| b.name())
    }

    /// Only the latest message is sent; history is not forwarded.
    async fn classify_with_model(
        backend: &dyn ChatBackend,
        message: &str,
    ) -> Result<TriageResult, LlmError> {
        let text = backend.complete(TRIAGE_SYSTEM_PROMPT, message).await?;
        parse_triage(&text)
    }
}

#[async_trait]
impl TriageClassifier for LlmClassifier {
    async fn classify(&self, message: &str, _history: &[HistoryEntry]) -> TriageResult {
        let Some(backend) = &self.backend else {
            return classify_by_keywords(message);
        };

        match Self::classify_with_model(backend.as_ref(), message).await {
            Ok(result) => {
                info!(provider = backend.name(), urgency = %result.urgency, "model triage complete");
                result
            }
            Err(e) => {
                warn!(
                    provider = backend.name(),
                    error = %e,
                    "model triage failed, falling back to keyword rules"
                );
                classify_by_keywords(message)
            }
        }
    }
}
