//! Plan payload sent to the refiner, and the final plan it returns

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ScoredTask;

/// Everything the refinement step needs to build a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPayload {
    /// Session time budget
    pub available_minutes: u32,

    /// Open descriptor such as "low", "medium" or "high"
    pub energy_level: String,

    /// Every scored task, score-descending
    pub all_tasks: Vec<ScoredTask>,

    /// Deterministic shortlist; a hint the refiner may override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_shortlist: Option<Vec<ScoredTask>>,
}

/// One entry of a final plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub title: String,
    pub reason: String,
    pub est_minutes: u32,
    pub score: f64,
}

/// The plan returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalPlan {
    /// Focus tasks for this session
    pub shortlist: Vec<PlanItem>,

    /// Optional extras if time or energy remains (0-2 items)
    pub nice_to_have: Vec<PlanItem>,

    /// Short explanation of the overall plan
    pub summary: String,
}

impl FinalPlan {
    /// Build a plan straight from the deterministic shortlist, without refinement
    pub fn from_shortlist(shortlist: &[ScoredTask], available_minutes: u32, energy_level: &str) -> Self {
        debug!(count = shortlist.len(), %available_minutes, %energy_level, "FinalPlan::from_shortlist: called");
        let items: Vec<PlanItem> = shortlist
            .iter()
            .map(|t| PlanItem {
                title: t.task.title.clone(),
                reason: format!(
                    "Score {} (importance {}, urgency {}, desire {}) and fits the remaining time",
                    t.score, t.task.importance, t.task.urgency, t.task.desire
                ),
                est_minutes: t.task.est_minutes,
                score: t.score,
            })
            .collect();

        let total: u32 = items.iter().map(|i| i.est_minutes).sum();
        let summary = if items.is_empty() {
            format!(
                "No task fits in {} minutes; consider freeing up more time (energy: {}).",
                available_minutes, energy_level
            )
        } else {
            format!(
                "{} task(s) selected by priority score, {} of {} minutes planned (energy: {}).",
                items.len(),
                total,
                available_minutes,
                energy_level
            )
        };

        Self {
            shortlist: items,
            nice_to_have: Vec::new(),
            summary,
        }
    }

    /// Total estimated minutes of the shortlist
    pub fn shortlist_minutes(&self) -> u32 {
        self.shortlist.iter().map(|i| i.est_minutes).sum()
    }
}
