//! Fixed-output classifier — the deterministic test adapter.

use codeloom_core::utterance::{Classifier, Intent, Utterance};
use std::collections::HashMap;

/// A classifier that always returns the same intent and entities,
/// regardless of input. Used in tests to pin turn behavior.
pub struct FixedClassifier {
    intent: Intent,
    entities: HashMap<String, String>,
}

impl FixedClassifier {
    pub fn new(intent: Intent, entities: HashMap<String, String>) -> Self {
        Self { intent, entities }
    }

    /// A classifier that marks everything `Unknown`.
    pub fn unknown() -> Self {
        Self::new(Intent::Unknown, HashMap::new())
    }
}

impl Classifier for FixedClassifier {
    fn name(&self) -> &str {
        "fixed"
    }

    fn classify(&self, raw: &str) -> Utterance {
        Utterance::new(raw, self.intent, self.entities.clone())
    }
}
