//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Task list normalizer prompt
pub const NORMALIZE: &str = include_str!("../../prompts/normalize.pmt");

/// Plan refiner prompt
pub const REFINE: &str = include_str!("../../prompts/refine.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "normalize" => Some(NORMALIZE),
        "refine" => Some(REFINE),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_normalize() {
        let prompt = get_embedded("normalize").unwrap();
        assert!(prompt.contains("Task List Normalizer"));
        assert!(prompt.contains("est_minutes"));
        assert!(prompt.contains("{{{raw_tasks}}}"));
    }

    #[test]
    fn test_get_embedded_refine() {
        let prompt = get_embedded("refine").unwrap();
        assert!(prompt.contains("nice_to_have"));
        assert!(prompt.contains("suggested_shortlist"));
        assert!(prompt.contains("{{{plan_json}}}"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
