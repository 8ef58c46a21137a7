use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

use triage_core::error::CoreError;
use triage_core::s3_keys;
use triage_core::traits::TranscriptStore;

use crate::error::StorageError;

const TRANSCRIPT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Transcript snapshots written to an S3 bucket, one object per request.
#[derive(Clone)]
pub struct S3TranscriptStore {
    client: Client,
    bucket: String,
}

impl S3TranscriptStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Upload `transcript` under `key`. Existing objects are overwritten.
    pub async fn upload(&self, key: &str, transcript: &str) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(TRANSCRIPT_CONTENT_TYPE)
            .body(ByteStream::from(transcript.as_bytes().to_vec()))
            .send()
            .await
            .map_err(|e| StorageError::PutObject(e.into_service_error().to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl TranscriptStore for S3TranscriptStore {
    async fn put_transcript(
        &self,
        user_id: &str,
        transcript: &str,
        at: jiff::Timestamp,
    ) -> Result<String, CoreError> {
        let key = s3_keys::transcript(user_id, at);
        self.upload(&key, transcript)
            .await
            .map_err(|e| CoreError::Transcript(e.to_string()))?;

        info!(bucket = %self.bucket, key, "transcript uploaded");
        Ok(key)
    }
}
