use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("SNS Publish error: {message}")]
    Publish { message: String, retryable: bool },

    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: Box<NotifyError> },
}

impl NotifyError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            NotifyError::Publish { retryable, .. } => *retryable,
            NotifyError::Exhausted { .. } => false,
        }
    }
}
