use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("DynamoDB GetItem error: {0}")]
    GetItem(String),

    #[error("DynamoDB PutItem error: {0}")]
    PutItem(String),

    #[error("malformed conversation item: {field}: {reason}")]
    MalformedItem { field: &'static str, reason: String },

    #[error("S3 PutObject error: {0}")]
    PutObject(String),
}
