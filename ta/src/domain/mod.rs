//! Domain types for the task advisor
//!
//! - [`Task`] / [`ScoredTask`] flow through the deterministic planner
//! - [`PlanPayload`] is handed to the refiner
//! - [`FinalPlan`] is what the caller gets back

mod plan;
mod rating;
mod task;

pub use plan::{FinalPlan, PlanItem, PlanPayload};
pub use rating::Rating;
pub use task::{ScoredTask, Task, sample_tasks};
