use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_sdk_sns::error::{ProvideErrorMetadata, SdkError};
use tracing::info;

use triage_core::decision::Alert;
use triage_core::error::CoreError;
use triage_core::traits::AlertSink;

use crate::error::NotifyError;
use crate::retry::RetryPolicy;

/// Service error codes worth another attempt. Anything else (bad
/// parameters, missing topic, authorization) fails the same way again.
const RETRYABLE_CODES: [&str; 6] = [
    "Throttling",
    "ThrottlingException",
    "Throttled",
    "InternalError",
    "InternalFailure",
    "ServiceUnavailable",
];

/// Whether a failed Publish should be retried. Transport failures and
/// timeouts (`code` is `None`) are retried; service errors only when their
/// code is transient.
pub fn is_retryable_code(code: Option<&str>) -> bool {
    code.is_none_or(|code| RETRYABLE_CODES.contains(&code))
}

/// Publishes alerts to one SNS topic.
#[derive(Clone)]
pub struct SnsNotifier {
    client: Client,
    topic_arn: String,
    retry: RetryPolicy,
}

impl SnsNotifier {
    /// Each attempt is bounded by the timeout configured on `config`.
    pub fn new(config: &aws_config::SdkConfig, topic_arn: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            topic_arn: topic_arn.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Publish once per attempt. Returns the SNS message id.
    pub async fn publish(&self, subject: &str, message: &str) -> Result<String, NotifyError> {
        let message_id = self
            .retry
            .run(|| async {
                let resp = self
                    .client
                    .publish()
                    .topic_arn(&self.topic_arn)
                    .subject(subject)
                    .message(message)
                    .send()
                    .await
                    .map_err(|e| {
                        let code = match &e {
                            SdkError::ServiceError(service) => {
                                Some(service.err().code().unwrap_or_default().to_string())
                            }
                            _ => None,
                        };
                        NotifyError::Publish {
                            retryable: is_retryable_code(code.as_deref()),
                            message: e.into_service_error().to_string(),
                        }
                    })?;
                Ok(resp.message_id().unwrap_or_default().to_string())
            })
            .await?;

        info!(topic_arn = %self.topic_arn, message_id, "alert published");
        Ok(message_id)
    }
}

#[async_trait]
impl AlertSink for SnsNotifier {
    async fn notify(&self, alert: &Alert) -> Result<(), CoreError> {
        self.publish(&alert.subject, &alert.message)
            .await
            .map(|_| ())
            .map_err(|e| CoreError::Alert(e.to_string()))
    }
}
