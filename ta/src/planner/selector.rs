//! Greedy time-boxed shortlist selection

use tracing::debug;

use crate::domain::ScoredTask;

/// Pick tasks in score order while they fit the remaining budget
///
/// Single pass, no backtracking: a task that does not fit is skipped for
/// good, even if a later, smaller task would have left room for it.
pub fn choose_shortlist(scored_tasks: &[ScoredTask], available_minutes: u32) -> Vec<ScoredTask> {
    debug!(count = scored_tasks.len(), %available_minutes, "choose_shortlist: called");
    let mut remaining = available_minutes;
    let mut shortlist = Vec::new();

    for t in scored_tasks {
        let est = t.est_minutes();
        if est <= remaining {
            remaining -= est;
            debug!(title = %t.title(), score = t.score, est, remaining, "choose_shortlist: selected");
            shortlist.push(t.clone());
        } else {
            debug!(title = %t.title(), score = t.score, est, remaining, "choose_shortlist: skipped, not enough time");
        }
    }

    debug!(selected = shortlist.len(), remaining, "choose_shortlist: complete");
    shortlist
}

/// Budget accounting for a chosen shortlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortlistSummary {
    pub available_minutes: u32,
    pub total_minutes: u32,
}

impl ShortlistSummary {
    pub fn new(shortlist: &[ScoredTask], available_minutes: u32) -> Self {
        Self {
            available_minutes,
            total_minutes: shortlist.iter().map(|t| t.est_minutes()).sum(),
        }
    }

    pub fn remaining_minutes(&self) -> u32 {
        self.available_minutes.saturating_sub(self.total_minutes)
    }
}
