//! Prompt Template System
//!
//! Template loading chain:
//! 1. `.taskadvisor/prompts/{name}.pmt` (user override)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{NormalizeContext, PromptLoader, RefineContext};
