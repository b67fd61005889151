//! LLM error types

use std::time::Duration;
use thiserror::Error;

use super::retry::is_retryable_status;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API key not found. Set the {0} environment variable.")]
    MissingApiKey(String),

    #[error("Unknown LLM provider: '{0}'. Supported: anthropic, openai, gemini")]
    UnknownProvider(String),
}

impl LlmError {
    /// Check if this error comes from missing or invalid configuration
    pub fn is_config(&self) -> bool {
        matches!(self, LlmError::MissingApiKey(_) | LlmError::UnknownProvider(_))
    }

    /// Check if the send loop should try the request again
    ///
    /// Rate limits are surfaced to the caller rather than retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::ApiError { status, .. } => is_retryable_status(*status),
            LlmError::Network(_) | LlmError::Timeout(_) => true,
            LlmError::RateLimited { .. }
            | LlmError::InvalidResponse(_)
            | LlmError::Json(_)
            | LlmError::MissingApiKey(_)
            | LlmError::UnknownProvider(_) => false,
        }
    }
}
