//! Entity recognizer port.
//!
//! A recognizer finds labelled spans (characters, crowd, props, effects)
//! in scene text. The analyzer falls back to its lexicon when no
//! recognizer is configured.

use crate::domain::Entity;

/// Port for named-entity recognition over scene text.
pub trait EntityRecognizer: Send + Sync {
    /// Short human-readable name, used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Find entities in `text`. Duplicates are allowed; the analyzer
    /// deduplicates per category.
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

/// A recognizer that never finds anything.
///
/// Keeps the analyzer on the model branch while reporting no entities.
#[derive(Debug, Clone, Default)]
pub struct NoopRecognizer;

impl EntityRecognizer for NoopRecognizer {
    fn name(&self) -> &str {
        "noop"
    }

    fn recognize(&self, _text: &str) -> Vec<Entity> {
        Vec::new()
    }
}
