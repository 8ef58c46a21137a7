use std::env;
use std::time::Duration;

use triage_llm::classifier::ProviderKind;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration, read once at startup from the environment.
///
/// Unset and empty variables are treated the same. Missing storage, topic or
/// token settings disable the corresponding step instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub dynamodb_table: Option<String>,
    pub s3_bucket: Option<String>,
    pub sns_topic_arn: Option<String>,
    /// Empty means no request can authenticate.
    pub twilio_auth_token: String,
    pub llm_provider: ProviderKind,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub bedrock_model_id: String,
    /// Overrides the URL reconstructed from the Host header when verifying
    /// signatures.
    pub webhook_url: Option<String>,
    /// Bound on every outbound network call.
    pub external_call_timeout: Duration,
    /// Listen port for the local runner.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            dynamodb_table: get("DYNAMODB_TABLE"),
            s3_bucket: get("S3_BUCKET"),
            sns_topic_arn: get("SNS_TOPIC_ARN"),
            twilio_auth_token: get("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            llm_provider: ProviderKind::from_name(
                &get("LLM_PROVIDER").unwrap_or_else(|| "openai".to_string()),
            ),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL")
                .unwrap_or_else(|| triage_llm::openai::DEFAULT_MODEL.to_string()),
            openai_base_url: get("OPENAI_BASE_URL"),
            bedrock_model_id: get("BEDROCK_MODEL_ID")
                .unwrap_or_else(|| triage_llm::bedrock::DEFAULT_MODEL_ID.to_string()),
            webhook_url: get("WEBHOOK_URL"),
            external_call_timeout: Duration::from_secs(parse_or(
                get("EXTERNAL_CALL_TIMEOUT_SECS"),
                "EXTERNAL_CALL_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT),
        }
    }

    /// Names of the deployment settings that are not configured.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.dynamodb_table.is_none() {
            missing.push("DYNAMODB_TABLE");
        }
        if self.s3_bucket.is_none() {
            missing.push("S3_BUCKET");
        }
        if self.sns_topic_arn.is_none() {
            missing.push("SNS_TOPIC_ARN");
        }
        if self.twilio_auth_token.is_empty() {
            missing.push("TWILIO_AUTH_TOKEN");
        }
        missing
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    value: Option<String>,
    key: &str,
    default: T,
) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "invalid value, using default");
            default
        }),
    }
}
