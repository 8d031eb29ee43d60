use async_trait::async_trait;
use thiserror::Error;

use crate::chat::{ChatRequest, ChatResponse};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("llm api key is not configured")]
    MissingApiKey,
    #[error("llm http client could not be built: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("llm transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("llm endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("llm response could not be decoded: {0}")]
    Decode(String),
}

impl LlmError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(error) => error.is_timeout() || error.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::MissingApiKey | Self::ClientBuild(_) | Self::Decode(_) => false,
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError>;
}

#[cfg(test)]
mod tests {
    use crate::llm::LlmError;

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        assert!(LlmError::Status { status: 429, body: String::new() }.is_retryable());
        assert!(LlmError::Status { status: 503, body: String::new() }.is_retryable());
    }

    #[test]
    fn client_errors_and_decode_failures_are_final() {
        assert!(!LlmError::Status { status: 401, body: String::new() }.is_retryable());
        assert!(!LlmError::Decode("eof".to_string()).is_retryable());
        assert!(!LlmError::MissingApiKey.is_retryable());
    }
}
