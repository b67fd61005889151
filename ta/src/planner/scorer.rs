//! Priority scoring
//!
//! Importance and urgency multiply (Eisenhower-style); desire is added on top
//! as a nudge between otherwise similar tasks.

use tracing::debug;

use crate::domain::{ScoredTask, Task};

const IMPORTANCE_WEIGHT: f64 = 1.5;
const URGENCY_WEIGHT: f64 = 1.0;
const DESIRE_WEIGHT: f64 = 1.0;

/// Compute the priority score of a single task
pub fn score(task: &Task) -> f64 {
    (IMPORTANCE_WEIGHT * f64::from(task.importance)) * (URGENCY_WEIGHT * f64::from(task.urgency))
        + DESIRE_WEIGHT * f64::from(task.desire)
}

/// Score every task and return copies sorted by score, highest first
///
/// The sort is stable: tasks with equal scores keep their input order.
pub fn score_tasks(tasks: &[Task]) -> Vec<ScoredTask> {
    debug!(count = tasks.len(), "score_tasks: called");
    let mut scored: Vec<ScoredTask> = tasks.iter().map(|t| ScoredTask::new(t.clone(), score(t))).collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    for t in &scored {
        debug!(title = %t.task.title, score = t.score, "score_tasks: scored");
    }
    scored
}
