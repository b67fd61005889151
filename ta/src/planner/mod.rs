//! Deterministic planning pipeline
//!
//! Scorer → Selector → Assembler. Every stage is a pure function over owned
//! or borrowed data; none of them can fail on well-typed input.

mod assembler;
mod scorer;
mod selector;

pub use assembler::assemble_plan_data;
pub use scorer::{score, score_tasks};
pub use selector::{ShortlistSummary, choose_shortlist};
