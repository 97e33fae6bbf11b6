use refinely_client::ClientError;
use thiserror::Error;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Client-side input validation failed; nothing was sent over the
    /// network.
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
    #[error("Clipboard error: {0}")]
    Clipboard(#[source] BoxedError),
}

impl WorkflowError {
    /// The message to put in front of the user: a validation message or
    /// backend-supplied detail when present, otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Client(ClientError::Backend(_, detail)) => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
