//! Error types for assistant operations

use thiserror::Error;

/// Errors from the optional AI assistant
#[derive(Debug, Error)]
pub enum AiError {
    /// Failed to reach the assistant service
    #[error("Failed to connect to assistant service: {0}")]
    Connection(String),

    /// Request exceeded the configured timeout
    #[error("Assistant request timed out after {0} seconds")]
    Timeout(u64),

    /// The assistant returned something unusable
    #[error("Invalid assistant response: {0}")]
    InvalidResponse(String),

    /// Assistant output failed JSON validation
    #[error("Failed to parse assistant output as JSON: {0}")]
    Parse(String),
}

/// Result type for assistant operations
pub type AiResult<T> = Result<T, AiError>;

impl AiError {
    /// Whether retrying the request could help
    pub fn is_retryable(&self) -> bool {
        matches!(self, AiError::Connection(_) | AiError::Timeout(_))
    }
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        AiError::Parse(err.to_string())
    }
}
