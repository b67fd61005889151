//! Turning raw model replies into typed values

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{AdvisorError, Stage};
use crate::llm::{CompletionResponse, StopReason};

/// Remove accidental ```` ```json ... ``` ```` fences around a reply
///
/// Drops the opening fence line (with or without a language tag) and a
/// trailing fence if present. Unfenced text is only trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        // "```[...]```" on one line: only the fence markers go
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a collaborator reply as `T`, keeping the raw text on failure
///
/// A reply that stopped at the token limit and does not parse is reported
/// as [`AdvisorError::Truncated`].
pub fn parse_reply<T: DeserializeOwned>(stage: Stage, response: CompletionResponse) -> Result<T, AdvisorError> {
    let truncated = response.stop_reason == StopReason::MaxTokens;
    if truncated {
        warn!(%stage, output_tokens = response.usage.output_tokens, "parse_reply: reply hit the token limit");
    }

    let Some(raw) = response.content else {
        debug!(%stage, stop_reason = ?response.stop_reason, "parse_reply: no content");
        return Err(AdvisorError::EmptyResponse { stage });
    };

    let cleaned = strip_code_fences(&raw);
    if cleaned.is_empty() {
        debug!(%stage, "parse_reply: blank content");
        return Err(AdvisorError::EmptyResponse { stage });
    }

    serde_json::from_str(cleaned).map_err(|source| {
        debug!(%stage, error = %source, truncated, "parse_reply: invalid JSON");
        let raw = cleaned.to_string();
        if truncated {
            AdvisorError::Truncated { stage, raw }
        } else {
            AdvisorError::Parse { stage, raw, source }
        }
    })
}
