//! Packaging of the plan payload handed to the refiner

use tracing::debug;

use crate::domain::{PlanPayload, ScoredTask};

/// Build the payload for the refinement step
///
/// No computation and no validation; `suggested_shortlist` is carried only
/// when present.
pub fn assemble_plan_data(
    all_tasks: Vec<ScoredTask>,
    available_minutes: u32,
    energy_level: impl Into<String>,
    suggested_shortlist: Option<Vec<ScoredTask>>,
) -> PlanPayload {
    let energy_level = energy_level.into();
    match &suggested_shortlist {
        Some(shortlist) => {
            debug!(count = shortlist.len(), "assemble_plan_data: with suggested shortlist");
        }
        None => {
            debug!("assemble_plan_data: no suggested shortlist");
        }
    }

    PlanPayload {
        available_minutes,
        energy_level,
        all_tasks,
        suggested_shortlist,
    }
}
