use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("conversation store error: {0}")]
    Store(String),

    #[error("transcript store error: {0}")]
    Transcript(String),

    #[error("alert delivery failed: {0}")]
    Alert(String),
}
