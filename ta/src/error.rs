//! Advisor error types

use thiserror::Error;

use crate::llm::LlmError;

/// Which collaborator produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Normalize,
    Refine,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normalize => write!(f, "normalize"),
            Self::Refine => write!(f, "refine"),
        }
    }
}

/// Errors that can end an advisor run
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Invalid task #{index}: {reason}")]
    InvalidTask { index: usize, reason: String },

    #[error("Failed to parse {stage} response: {source}")]
    Parse {
        stage: Stage,
        /// The offending reply, after fence stripping
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("The {stage} response was cut off at the token limit")]
    Truncated {
        stage: Stage,
        /// The partial reply, after fence stripping
        raw: String,
    },

    #[error("Empty {stage} response")]
    EmptyResponse { stage: Stage },

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("LLM error: {0}")]
    Llm(LlmError),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl From<LlmError> for AdvisorError {
    fn from(err: LlmError) -> Self {
        if err.is_config() {
            AdvisorError::MissingConfig(err.to_string())
        } else {
            AdvisorError::Llm(err)
        }
    }
}

impl AdvisorError {
    /// Check if this is a collaborator parse failure
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            AdvisorError::Parse { .. } | AdvisorError::Truncated { .. } | AdvisorError::EmptyResponse { .. }
        )
    }

    /// The raw collaborator text kept for diagnostics, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AdvisorError::Parse { raw, .. } | AdvisorError::Truncated { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
