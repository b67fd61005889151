//! Task and ScoredTask records

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Rating;

/// A normalized task as supplied by the user or the normalizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display title (not guaranteed unique)
    pub title: String,

    /// How critical the task is to the user's goals
    pub importance: Rating,

    /// How soon the task needs attention
    pub urgency: Rating,

    /// How motivated the user feels to do it
    pub desire: Rating,

    /// Estimated completion time in minutes
    pub est_minutes: u32,
}

impl Task {
    /// Create a new task
    pub fn new(title: impl Into<String>, importance: Rating, urgency: Rating, desire: Rating, est_minutes: u32) -> Self {
        Self {
            title: title.into(),
            importance,
            urgency,
            desire,
            est_minutes,
        }
    }

    /// Check the fields serde cannot enforce
    pub fn validate(&self) -> Result<(), String> {
        debug!(title = %self.title, "Task::validate: called");
        if self.title.trim().is_empty() {
            debug!("Task::validate: blank title");
            return Err("title must not be empty".to_string());
        }
        Ok(())
    }
}

/// A task together with its derived priority score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,

    pub score: f64,
}

impl ScoredTask {
    pub fn new(task: Task, score: f64) -> Self {
        Self { task, score }
    }

    pub fn title(&self) -> &str {
        &self.task.title
    }

    pub fn est_minutes(&self) -> u32 {
        self.task.est_minutes
    }
}

/// Built-in task set used when the caller supplies neither a list nor raw text
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("Email accountant", Rating::High, Rating::High, Rating::Low, 20),
        Task::new("Practice DSA", Rating::Medium, Rating::Low, Rating::High, 30),
        Task::new("Take a break", Rating::Medium, Rating::Medium, Rating::Medium, 20),
    ]
}
