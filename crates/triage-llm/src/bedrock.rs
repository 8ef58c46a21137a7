//! Bedrock Converse backend.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use tracing::debug;

use crate::backend::ChatBackend;
use crate::error::LlmError;

pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

#[derive(Clone)]
pub struct BedrockBackend {
    client: Client,
    model_id: String,
}

impl BedrockBackend {
    /// Calls are bounded by the timeout configured on `config`.
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl ChatBackend for BedrockBackend {
    fn name(&self) -> &'static str {
        "bedrock"
    }

    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(
                Message::builder()
                    .role(ConversationRole::User)
                    .content(ContentBlock::Text(user_message.to_string()))
                    .build()
                    .map_err(|e| LlmError::Invocation(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| LlmError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| LlmError::ResponseParse("no message in response".to_string()))?;

        let response_text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        debug!(model = %self.model_id, len = response_text.len(), "bedrock completion received");
        Ok(response_text)
    }
}
