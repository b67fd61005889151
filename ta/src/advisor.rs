//! Advisor - the root orchestrator
//!
//! One run is a single linear pass:
//! resolve tasks → score → shortlist → assemble payload → refine.
//! Nothing is shared between runs except the immutable collaborators.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{Instrument, debug, info, info_span};

use crate::agents::{LlmNormalizer, LlmRefiner, Normalizer, Refiner};
use crate::domain::{FinalPlan, PlanPayload, Task, sample_tasks};
use crate::error::AdvisorError;
use crate::llm::LlmClient;
use crate::planner::{ShortlistSummary, assemble_plan_data, choose_shortlist, score_tasks};
use crate::prompts::PromptLoader;

/// Default session time budget
pub const DEFAULT_AVAILABLE_MINUTES: u32 = 60;

/// Default energy level
pub const DEFAULT_ENERGY_LEVEL: &str = "medium";

/// Where the tasks for a run come from
#[derive(Debug, Clone, PartialEq)]
pub enum TaskSource {
    /// Already-normalized tasks, used as-is
    Explicit(Vec<Task>),
    /// Free-form text that the normalizer must turn into tasks
    Raw(String),
    /// The built-in sample task set
    Sample,
}

impl TaskSource {
    /// Resolve optional inputs, first match wins: explicit list, raw text, sample
    pub fn from_options(tasks: Option<Vec<Task>>, raw_task_text: Option<String>) -> Self {
        match (tasks, raw_task_text) {
            (Some(tasks), _) => Self::Explicit(tasks),
            (None, Some(raw)) => Self::Raw(raw),
            (None, None) => Self::Sample,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Explicit(_) => "explicit",
            Self::Raw(_) => "raw",
            Self::Sample => "sample",
        }
    }
}

/// Whether the refiner has the final word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    /// The refiner builds the final plan; the deterministic shortlist is a hint
    #[default]
    Refine,
    /// The deterministic shortlist is the final plan; no refiner call
    Deterministic,
}

impl std::fmt::Display for PlanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Refine => write!(f, "refine"),
            Self::Deterministic => write!(f, "deterministic"),
        }
    }
}

/// Inputs for one advisor run
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub source: TaskSource,
    pub available_minutes: u32,
    pub energy_level: String,
    pub mode: PlanMode,
}

impl AdviceRequest {
    pub fn new(source: TaskSource) -> Self {
        Self {
            source,
            available_minutes: DEFAULT_AVAILABLE_MINUTES,
            energy_level: DEFAULT_ENERGY_LEVEL.to_string(),
            mode: PlanMode::default(),
        }
    }

    pub fn with_minutes(mut self, available_minutes: u32) -> Self {
        self.available_minutes = available_minutes;
        self
    }

    pub fn with_energy(mut self, energy_level: impl Into<String>) -> Self {
        self.energy_level = energy_level.into();
        self
    }

    pub fn with_mode(mut self, mode: PlanMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for AdviceRequest {
    fn default() -> Self {
        Self::new(TaskSource::Sample)
    }
}

/// Fail fast on tasks that serde accepted but the planner should not see
pub fn validate_tasks(tasks: &[Task]) -> Result<(), AdvisorError> {
    for (index, task) in tasks.iter().enumerate() {
        task.validate()
            .map_err(|reason| AdvisorError::InvalidTask { index, reason })?;
    }
    Ok(())
}

/// Run the deterministic stages and package the result for refinement
pub fn prepare_plan(tasks: &[Task], available_minutes: u32, energy_level: &str) -> PlanPayload {
    debug!(count = tasks.len(), %available_minutes, %energy_level, "prepare_plan: called");
    let scored = score_tasks(tasks);
    let shortlist = choose_shortlist(&scored, available_minutes);

    let summary = ShortlistSummary::new(&shortlist, available_minutes);
    info!(
        selected = shortlist.len(),
        total_minutes = summary.total_minutes,
        remaining_minutes = summary.remaining_minutes(),
        "Deterministic shortlist chosen"
    );

    assemble_plan_data(scored, available_minutes, energy_level, Some(shortlist))
}

/// Root orchestrator
///
/// Collaborators are optional so the deterministic path can run without any
/// LLM configuration; a run that needs a missing one fails with
/// [`AdvisorError::MissingConfig`].
#[derive(Clone, Default)]
pub struct Advisor {
    normalizer: Option<Arc<dyn Normalizer>>,
    refiner: Option<Arc<dyn Refiner>>,
}

impl Advisor {
    pub fn new(normalizer: Arc<dyn Normalizer>, refiner: Arc<dyn Refiner>) -> Self {
        Self {
            normalizer: Some(normalizer),
            refiner: Some(refiner),
        }
    }

    /// Advisor wired to LLM-backed collaborators sharing one client
    pub fn from_llm(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>) -> Self {
        Self::new(
            Arc::new(LlmNormalizer::new(llm.clone(), prompts.clone())),
            Arc::new(LlmRefiner::new(llm, prompts)),
        )
    }

    /// Advisor with no collaborators (explicit/sample tasks, deterministic mode)
    pub fn offline() -> Self {
        Self::default()
    }

    /// Resolve the task source into a validated task list
    pub async fn resolve_tasks(&self, source: TaskSource) -> Result<Vec<Task>, AdvisorError> {
        debug!(source = source.kind(), "resolve_tasks: called");
        let tasks = match source {
            TaskSource::Explicit(tasks) => tasks,
            TaskSource::Sample => sample_tasks(),
            TaskSource::Raw(raw) => {
                let normalizer = self
                    .normalizer
                    .as_ref()
                    .ok_or_else(|| AdvisorError::MissingConfig("no normalizer configured for raw task text".to_string()))?;
                normalizer.normalize(&raw).await?
            }
        };

        validate_tasks(&tasks)?;
        Ok(tasks)
    }

    /// Run the full pipeline
    pub async fn run(&self, request: AdviceRequest) -> Result<FinalPlan, AdvisorError> {
        let run_id = uuid::Uuid::now_v7();
        let span = info_span!("advisor_run", %run_id, mode = %request.mode);
        self.run_inner(request).instrument(span).await
    }

    async fn run_inner(&self, request: AdviceRequest) -> Result<FinalPlan, AdvisorError> {
        let AdviceRequest {
            source,
            available_minutes,
            energy_level,
            mode,
        } = request;
        info!(source = source.kind(), available_minutes, %energy_level, "Advisor run started");

        // Check collaborators before spending a normalizer call
        if mode == PlanMode::Refine && self.refiner.is_none() {
            return Err(AdvisorError::MissingConfig("no refiner configured".to_string()));
        }

        let tasks = self.resolve_tasks(source).await?;
        let payload = prepare_plan(&tasks, available_minutes, &energy_level);

        let plan = match (mode, &self.refiner) {
            (PlanMode::Refine, Some(refiner)) => {
                info!("Calling refiner");
                refiner.refine(&payload).await?
            }
            _ => {
                info!("Using deterministic shortlist as final plan");
                let shortlist = payload.suggested_shortlist.as_deref().unwrap_or_default();
                FinalPlan::from_shortlist(shortlist, available_minutes, &energy_level)
            }
        };

        info!(
            shortlist = plan.shortlist.len(),
            nice_to_have = plan.nice_to_have.len(),
            "Advisor run complete"
        );
        Ok(plan)
    }

    /// Caller-facing entrypoint: raw text in, refined plan out
    pub async fn advise(
        &self,
        raw_task_text: &str,
        available_minutes: u32,
        energy_level: &str,
    ) -> Result<FinalPlan, AdvisorError> {
        debug!(%available_minutes, %energy_level, "advise: called");
        self.run(
            AdviceRequest::new(TaskSource::Raw(raw_task_text.to_string()))
                .with_minutes(available_minutes)
                .with_energy(energy_level),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rating;
    use crate::error::Stage;
    use crate::llm::client::mock::MockLlmClient;

    const NORMALIZED: &str = r#"[
        {"title": "Email accountant", "importance": 3, "urgency": 3, "desire": 1, "est_minutes": 20},
        {"title": "Practice DSA", "importance": 2, "urgency": 1, "desire": 3, "est_minutes": 30},
        {"title": "Take a break", "importance": 2, "urgency": 2, "desire": 2, "est_minutes": 20}
    ]"#;

    const PLAN: &str = r#"{
        "shortlist": [
            {"title": "Email accountant", "reason": "Due today", "est_minutes": 20, "score": 14.5},
            {"title": "Practice DSA", "reason": "You want to", "est_minutes": 30, "score": 6.0}
        ],
        "nice_to_have": [],
        "summary": "Email first, then DSA."
    }"#;

    fn llm_advisor(mock: Arc<MockLlmClient>) -> Advisor {
        Advisor::from_llm(mock, Arc::new(PromptLoader::embedded_only()))
    }

    #[test]
    fn test_task_source_precedence() {
        let tasks = sample_tasks();
        assert_eq!(
            TaskSource::from_options(Some(tasks.clone()), Some("ignored".to_string())),
            TaskSource::Explicit(tasks)
        );
        assert_eq!(
            TaskSource::from_options(None, Some("raw".to_string())),
            TaskSource::Raw("raw".to_string())
        );
        assert_eq!(TaskSource::from_options(None, None), TaskSource::Sample);
    }

    #[test]
    fn test_request_defaults() {
        let request = AdviceRequest::default();
        assert_eq!(request.available_minutes, 60);
        assert_eq!(request.energy_level, "medium");
        assert_eq!(request.mode, PlanMode::Refine);
        assert_eq!(request.source, TaskSource::Sample);
    }

    #[test]
    fn test_prepare_plan_sample_scenario() {
        let payload = prepare_plan(&sample_tasks(), 60, "medium");

        let scores: Vec<f64> = payload.all_tasks.iter().map(|t| t.score).collect();
        assert_eq!(scores, vec![14.5, 8.0, 6.0]);

        let shortlist = payload.suggested_shortlist.unwrap();
        let titles: Vec<&str> = shortlist.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["Email accountant", "Take a break"]);
    }

    #[test]
    fn test_validate_tasks_reports_index() {
        let tasks = vec![
            Task::new("ok", Rating::Low, Rating::Low, Rating::Low, 5),
            Task::new("", Rating::Low, Rating::Low, Rating::Low, 5),
        ];
        let err = validate_tasks(&tasks).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidTask { index: 1, .. }));
    }

    #[tokio::test]
    async fn test_run_raw_text_normalizes_then_refines() {
        let mock = Arc::new(MockLlmClient::with_texts(&[NORMALIZED, PLAN]));
        let plan = llm_advisor(mock.clone()).advise("email, dsa, break", 60, "low").await.unwrap();

        assert_eq!(plan.summary, "Email first, then DSA.");
        // Refiner may override the deterministic shortlist
        assert_eq!(plan.shortlist[1].title, "Practice DSA");
        assert_eq!(mock.call_count(), 2);

        let refine_prompt = &mock.requests()[1].messages[0].content;
        assert!(refine_prompt.contains("\"energy_level\": \"low\""));
    }

    #[tokio::test]
    async fn test_run_explicit_tasks_skips_normalizer() {
        let mock = Arc::new(MockLlmClient::with_texts(&[PLAN]));
        let request = AdviceRequest::new(TaskSource::Explicit(sample_tasks()));

        let plan = llm_advisor(mock.clone()).run(request).await.unwrap();
        assert_eq!(plan.shortlist.len(), 2);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_run_deterministic_skips_refiner() {
        let mock = Arc::new(MockLlmClient::new(vec![]));
        let request = AdviceRequest::default().with_mode(PlanMode::Deterministic);

        let plan = llm_advisor(mock.clone()).run(request).await.unwrap();
        let titles: Vec<&str> = plan.shortlist.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Email accountant", "Take a break"]);
        assert_eq!(plan.shortlist_minutes(), 40);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_offline_advisor_deterministic_zero_budget() {
        let request = AdviceRequest::default()
            .with_mode(PlanMode::Deterministic)
            .with_minutes(0);
        let plan = Advisor::offline().run(request).await.unwrap();
        assert!(plan.shortlist.is_empty());
    }

    #[tokio::test]
    async fn test_offline_advisor_cannot_refine() {
        let err = Advisor::offline().run(AdviceRequest::default()).await.unwrap_err();
        assert!(matches!(err, AdvisorError::MissingConfig(_)));

        let request = AdviceRequest::new(TaskSource::Raw("x".to_string())).with_mode(PlanMode::Deterministic);
        let err = Advisor::offline().run(request).await.unwrap_err();
        assert!(matches!(err, AdvisorError::MissingConfig(_)));
    }

    #[tokio::test]
    async fn test_malformed_refiner_reply_fails_run() {
        let mock = Arc::new(MockLlmClient::with_texts(&["no plan today"]));
        let err = llm_advisor(mock).run(AdviceRequest::default()).await.unwrap_err();
        assert!(matches!(err, AdvisorError::Parse { stage: Stage::Refine, .. }));
    }

    #[tokio::test]
    async fn test_malformed_normalizer_reply_fails_run() {
        let mock = Arc::new(MockLlmClient::with_texts(&["tasks: email", PLAN]));
        let err = llm_advisor(mock.clone()).advise("email", 30, "high").await.unwrap_err();
        assert!(matches!(err, AdvisorError::Parse { stage: Stage::Normalize, .. }));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_title_from_normalizer_fails_fast() {
        let reply = r#"[{"title": " ", "importance": 1, "urgency": 1, "desire": 1, "est_minutes": 5}]"#;
        let mock = Arc::new(MockLlmClient::with_texts(&[reply, PLAN]));
        let err = llm_advisor(mock.clone()).advise("?", 30, "high").await.unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidTask { index: 0, .. }));
        assert_eq!(mock.call_count(), 1);
    }
}
