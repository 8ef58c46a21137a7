use std::sync::Arc;

use tracing::{info, warn};

use triage_core::traits::{AlertSink, ConversationStore, TranscriptStore, TriageClassifier};
use triage_llm::bedrock::BedrockBackend;
use triage_llm::classifier::{LlmClassifier, ProviderKind};
use triage_llm::openai::OpenAiBackend;
use triage_notify::sns::SnsNotifier;
use triage_storage::conversations::ConversationTable;
use triage_storage::transcripts::S3TranscriptStore;

use crate::config::Config;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Built once at startup and reused by every request. `None` collaborators
/// are simply skipped by the pipeline.
#[derive(Clone)]
pub struct AppState {
    pub auth_token: String,
    pub webhook_url: Option<String>,
    pub conversations: Option<Arc<dyn ConversationStore>>,
    pub transcripts: Option<Arc<dyn TranscriptStore>>,
    pub alerts: Option<Arc<dyn AlertSink>>,
    pub classifier: Arc<dyn TriageClassifier>,
}

impl AppState {
    /// Build the AWS- and model-backed collaborators named by `config`.
    pub async fn from_config(config: &Config) -> eyre::Result<Self> {
        let sdk = triage_storage::client::load_config(config.external_call_timeout).await;

        let conversations = config.dynamodb_table.as_ref().map(|table| {
            Arc::new(ConversationTable::new(
                triage_storage::client::dynamodb_client(&sdk),
                table,
            )) as Arc<dyn ConversationStore>
        });

        let transcripts = config.s3_bucket.as_ref().map(|bucket| {
            Arc::new(S3TranscriptStore::new(
                triage_storage::client::s3_client(&sdk),
                bucket,
            )) as Arc<dyn TranscriptStore>
        });

        let alerts = config
            .sns_topic_arn
            .as_ref()
            .map(|topic| Arc::new(SnsNotifier::new(&sdk, topic)) as Arc<dyn AlertSink>);

        let classifier = build_classifier(config, &sdk)?;
        info!(
            provider = %config.llm_provider,
            backend = classifier.backend_name(),
            persistence = conversations.is_some(),
            transcripts = transcripts.is_some(),
            alerts = alerts.is_some(),
            "application state ready"
        );

        Ok(Self {
            auth_token: config.twilio_auth_token.clone(),
            webhook_url: config.webhook_url.clone(),
            conversations,
            transcripts,
            alerts,
            classifier: Arc::new(classifier),
        })
    }
}

fn build_classifier(config: &Config, sdk: &aws_config::SdkConfig) -> eyre::Result<LlmClassifier> {
    let classifier = match config.llm_provider {
        ProviderKind::OpenAi => match &config.openai_api_key {
            Some(api_key) => {
                let mut backend = OpenAiBackend::new(
                    api_key,
                    &config.openai_model,
                    config.external_call_timeout,
                )?;
                if let Some(base_url) = &config.openai_base_url {
                    backend = backend.with_base_url(base_url);
                }
                LlmClassifier::new(Arc::new(backend))
            }
            None => {
                warn!("OPENAI_API_KEY is not set, triage will use keyword rules only");
                LlmClassifier::keywords_only()
            }
        },
        ProviderKind::Bedrock => {
            LlmClassifier::new(Arc::new(BedrockBackend::new(sdk, &config.bedrock_model_id)))
        }
        ProviderKind::Keywords => LlmClassifier::keywords_only(),
    };
    Ok(classifier)
}
