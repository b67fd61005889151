//! Normalizer - turns free-form task text into typed tasks

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::reply::parse_reply;
use crate::domain::Task;
use crate::error::{AdvisorError, Stage};
use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::prompts::PromptLoader;

const SYSTEM_PROMPT: &str = "You convert task lists into strict JSON. Output JSON only.";

/// Max tokens for the normalizer reply
const NORMALIZE_MAX_TOKENS: u32 = 2048;

/// External collaborator that normalizes raw task text
#[async_trait]
pub trait Normalizer: Send + Sync {
    async fn normalize(&self, raw_task_text: &str) -> Result<Vec<Task>, AdvisorError>;
}

/// Normalizer backed by an LLM
pub struct LlmNormalizer {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
}

impl LlmNormalizer {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>) -> Self {
        Self { llm, prompts }
    }
}

#[async_trait]
impl Normalizer for LlmNormalizer {
    async fn normalize(&self, raw_task_text: &str) -> Result<Vec<Task>, AdvisorError> {
        debug!(raw_len = raw_task_text.len(), "LlmNormalizer::normalize: called");
        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            messages: vec![Message::user(self.prompts.normalize_prompt(raw_task_text)?)],
            max_tokens: NORMALIZE_MAX_TOKENS,
        };

        let response = self.llm.complete(request).await?;
        debug!(
            total_tokens = response.usage.total(),
            stop_reason = ?response.stop_reason,
            "LlmNormalizer::normalize: reply received"
        );

        let tasks: Vec<Task> = parse_reply(Stage::Normalize, response)?;
        info!(count = tasks.len(), "Normalized {} task(s)", tasks.len());
        Ok(tasks)
    }
}
