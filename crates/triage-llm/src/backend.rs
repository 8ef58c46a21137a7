use async_trait::async_trait;

use crate::error::LlmError;

/// A chat model that answers one system instruction plus one user turn.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short provider name for logs, e.g. `"openai"`.
    fn name(&self) -> &'static str;

    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError>;
}
