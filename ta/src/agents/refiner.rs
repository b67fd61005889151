//! Refiner - asks the model to pick, explain and extend the final plan

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::reply::parse_reply;
use crate::domain::{FinalPlan, PlanPayload};
use crate::error::{AdvisorError, Stage};
use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::prompts::PromptLoader;

const SYSTEM_PROMPT: &str = "You are a task prioritization advisor. Output a single JSON object only.";

/// Max tokens for the refiner reply
const REFINE_MAX_TOKENS: u32 = 4096;

/// External collaborator that turns a plan payload into the final plan
#[async_trait]
pub trait Refiner: Send + Sync {
    async fn refine(&self, payload: &PlanPayload) -> Result<FinalPlan, AdvisorError>;
}

/// Refiner backed by an LLM
pub struct LlmRefiner {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
}

impl LlmRefiner {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>) -> Self {
        Self { llm, prompts }
    }
}

#[async_trait]
impl Refiner for LlmRefiner {
    async fn refine(&self, payload: &PlanPayload) -> Result<FinalPlan, AdvisorError> {
        debug!(
            task_count = payload.all_tasks.len(),
            available_minutes = payload.available_minutes,
            "LlmRefiner::refine: called"
        );
        let plan_json = serde_json::to_string_pretty(payload)
            .map_err(|e| AdvisorError::Prompt(format!("Failed to serialize plan payload: {}", e)))?;

        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            messages: vec![Message::user(self.prompts.refine_prompt(plan_json)?)],
            max_tokens: REFINE_MAX_TOKENS,
        };

        let response = self.llm.complete(request).await?;
        debug!(
            total_tokens = response.usage.total(),
            stop_reason = ?response.stop_reason,
            "LlmRefiner::refine: reply received"
        );

        let plan: FinalPlan = parse_reply(Stage::Refine, response)?;
        info!(
            shortlist = plan.shortlist.len(),
            nice_to_have = plan.nice_to_have.len(),
            "Refined plan received"
        );
        Ok(plan)
    }
}
