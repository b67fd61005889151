//! External collaborators reached through an LLM
//!
//! Both are traits so the advisor can be driven by scripted fakes in tests.

mod normalizer;
mod refiner;
mod reply;

pub use normalizer::{LlmNormalizer, Normalizer};
pub use refiner::{LlmRefiner, Refiner};
pub use reply::{parse_reply, strip_code_fences};
