//! Utterance classification types.
//!
//! Raw user input is classified once, before orchestration, into an
//! [`Utterance`]: the raw text plus a derived intent and any extracted
//! entities. The result is immutable for the rest of the turn.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Entity key for the target path of a file operation.
pub const ENTITY_FILE_PATH: &str = "file_path";
/// Entity key for file content.
pub const ENTITY_CONTENT: &str = "content";
/// Entity key for a mentioned programming language.
pub const ENTITY_LANGUAGE: &str = "language";

/// The coarse category of a user request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Write new code from a description
    CodeGeneration,
    /// Explain what existing code does
    CodeExplanation,
    /// Find or fix a problem in code
    DebugCode,
    /// Improve existing code
    RefactorCode,
    /// Put a file into the workspace
    AddFile,
    /// Anything else; routed to the model as a generic query
    Unknown,
}

/// One classified user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    /// The text exactly as the user typed it
    pub raw: String,

    /// Derived intent
    pub intent: Intent,

    /// Extracted entity names mapped to string values
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub entities: HashMap<String, String>,
}

impl Utterance {
    /// Create a classified utterance.
    pub fn new(raw: impl Into<String>, intent: Intent, entities: HashMap<String, String>) -> Self {
        Self {
            raw: raw.into(),
            intent,
            entities,
        }
    }

    /// Create an unclassified utterance (intent unknown, no entities).
    pub fn unknown(raw: impl Into<String>) -> Self {
        Self::new(raw, Intent::Unknown, HashMap::new())
    }

    /// Look up an extracted entity by name.
    pub fn entity(&self, name: &str) -> Option<&str> {
        self.entities.get(name).map(String::as_str)
    }
}

/// The classification seam.
///
/// Production uses the rule-based adapter in `codeloom-classifier`; tests
/// substitute a fixed-output adapter so turn behavior is deterministic.
/// Ambiguous input is not an error: it classifies as [`Intent::Unknown`].
pub trait Classifier: Send + Sync {
    /// A human-readable name for this classifier (e.g., "rules", "fixed").
    fn name(&self) -> &str;

    /// Classify one raw user message.
    fn classify(&self, raw: &str) -> Utterance;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_utterance_has_no_entities() {
        let utt = Utterance::unknown("tell me a joke");
        assert_eq!(utt.intent, Intent::Unknown);
        assert!(utt.entities.is_empty());
        assert_eq!(utt.entity(ENTITY_FILE_PATH), None);
    }

    #[test]
    fn entity_lookup() {
        let mut entities = HashMap::new();
        entities.insert(ENTITY_FILE_PATH.to_string(), "x.py".to_string());
        let utt = Utterance::new("add file \"x.py\"", Intent::AddFile, entities);
        assert_eq!(utt.entity(ENTITY_FILE_PATH), Some("x.py"));
        assert_eq!(utt.entity(ENTITY_CONTENT), None);
    }

    #[test]
    fn intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::CodeGeneration).unwrap();
        assert_eq!(json, "\"code_generation\"");
    }
}
