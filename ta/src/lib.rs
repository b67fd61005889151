//! TaskAdvisor - time-boxed task planning
//!
//! Takes a messy task list, rates each task on importance, urgency and
//! desire, scores and ranks them, greedily fits a shortlist into the time
//! the user has, and asks an LLM collaborator to turn that into a short,
//! explained plan.
//!
//! # Pipeline
//!
//! raw text → [`agents::Normalizer`] → [`planner::score_tasks`] →
//! [`planner::choose_shortlist`] → [`planner::assemble_plan_data`] →
//! [`agents::Refiner`] → [`FinalPlan`]
//!
//! # Modules
//!
//! - [`advisor`] - Root orchestrator for one planning run
//! - [`agents`] - LLM-backed normalizer and refiner collaborators
//! - [`domain`] - Task, rating and plan records
//! - [`planner`] - Deterministic scoring, selection and assembly
//! - [`llm`] - LLM client trait and provider implementations
//! - [`prompts`] - Prompt templates
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod advisor;
pub mod agents;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod render;

// Re-export commonly used types
pub use advisor::{AdviceRequest, Advisor, PlanMode, TaskSource};
pub use config::{Config, LlmConfig, PlannerConfig};
pub use domain::{FinalPlan, PlanItem, PlanPayload, Rating, ScoredTask, Task};
pub use error::{AdvisorError, Stage};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
pub use planner::{assemble_plan_data, choose_shortlist, score_tasks};
