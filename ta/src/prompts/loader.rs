//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to the
//! embedded defaults.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::error::AdvisorError;

/// Context for the normalizer template
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeContext<'a> {
    pub raw_tasks: &'a str,
}

/// Context for the refiner template
#[derive(Debug, Clone, Serialize)]
pub struct RefineContext {
    pub plan_json: String,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.taskadvisor/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that checks `{root}/.taskadvisor/prompts/` first
    pub fn new(root: impl AsRef<Path>) -> Self {
        let user_dir = root.as_ref().join(".taskadvisor/prompts");
        let exists = user_dir.exists();
        debug!(?user_dir, %exists, "PromptLoader::new: called");

        Self {
            hbs: Handlebars::new(),
            user_dir: if exists { Some(user_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Handlebars::new(),
            user_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.taskadvisor/prompts/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String, AdvisorError> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found in user override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| AdvisorError::Prompt(format!("Failed to read prompt {}: {}", path.display(), e)));
            }
        }

        embedded::get_embedded(name)
            .map(str::to_string)
            .ok_or_else(|| AdvisorError::Prompt(format!("Prompt template not found: {}", name)))
    }

    fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String, AdvisorError> {
        let template = self.load_template(name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| AdvisorError::Prompt(format!("Failed to render template {}: {}", name, e)))
    }

    /// Render the normalizer prompt for the given raw input
    pub fn normalize_prompt(&self, raw_tasks: &str) -> Result<String, AdvisorError> {
        debug!(raw_len = raw_tasks.len(), "PromptLoader::normalize_prompt: called");
        self.render("normalize", &NormalizeContext { raw_tasks })
    }

    /// Render the refiner prompt with the plan payload as JSON
    pub fn refine_prompt(&self, plan_json: String) -> Result<String, AdvisorError> {
        debug!(plan_len = plan_json.len(), "PromptLoader::refine_prompt: called");
        self.render("refine", &RefineContext { plan_json })
    }
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self::embedded_only()
    }
}
