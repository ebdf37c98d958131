//! Rule-based classifier — regex heuristics over the raw utterance.
//!
//! Intents are matched in a fixed priority order; the first hit wins.
//! Anything that matches nothing classifies as `Unknown`, which is not an
//! error: unknown utterances are routed to the model as generic queries.

use codeloom_core::utterance::{
    Classifier, Intent, Utterance, ENTITY_CONTENT, ENTITY_FILE_PATH, ENTITY_LANGUAGE,
};
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// The production classifier: keyword patterns for intent, plus entity
/// extraction for the `add file` form and mentioned languages.
pub struct RuleClassifier {
    code_generation: Regex,
    code_explanation: Regex,
    debug_code: Regex,
    refactor_code: Regex,
    add_file: Regex,
    add_file_with_content: Regex,
    add_file_path_only: Regex,
}

impl RuleClassifier {
    pub fn new() -> Self {
        // The patterns are fixed string literals; compilation cannot fail.
        Self {
            code_generation: Regex::new(
                r"(?i)\b(write|generate|create)\b.*?\b(function|class|code|script)\b",
            )
            .unwrap(),
            code_explanation: Regex::new(r"(?i)\b(explain|describe|what does .*?do)\b").unwrap(),
            debug_code: Regex::new(r"(?i)\b(debug|fix|error|problem)\b").unwrap(),
            refactor_code: Regex::new(r"(?i)\b(refactor|improve|optimize)\b").unwrap(),
            add_file: Regex::new(r"(?i)\b(add file|load file)\b").unwrap(),
            add_file_with_content: Regex::new(
                r#"(?is)(?:add file|load file)\s*['"]?(.*?)['"]?\s*(?:with content|as)\s*['"]?(.*?)['"]?$"#,
            )
            .unwrap(),
            add_file_path_only: Regex::new(r#"(?i)(?:add file|load file)\s*['"]?(.*?)['"]?$"#)
                .unwrap(),
        }
    }

    /// Strip surrounding whitespace and quote characters from a captured
    /// entity value.
    fn clean(capture: &str) -> String {
        capture.trim().trim_matches(['"', '\'']).to_string()
    }

    fn extract_add_file_entities(&self, raw: &str, entities: &mut HashMap<String, String>) {
        if let Some(caps) = self.add_file_with_content.captures(raw) {
            entities.insert(ENTITY_FILE_PATH.into(), Self::clean(&caps[1]));
            entities.insert(ENTITY_CONTENT.into(), Self::clean(&caps[2]));
        } else if let Some(caps) = self.add_file_path_only.captures(raw) {
            entities.insert(ENTITY_FILE_PATH.into(), Self::clean(&caps[1]));
        }
    }

    fn extract_language(raw: &str, entities: &mut HashMap<String, String>) {
        let lower = raw.to_lowercase();
        // "javascript" contains "java", so check it first.
        if lower.contains("python") {
            entities.insert(ENTITY_LANGUAGE.into(), "python".into());
        } else if lower.contains("javascript") {
            entities.insert(ENTITY_LANGUAGE.into(), "javascript".into());
        } else if lower.contains("java") {
            entities.insert(ENTITY_LANGUAGE.into(), "java".into());
        }
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for RuleClassifier {
    fn name(&self) -> &str {
        "rules"
    }

    fn classify(&self, raw: &str) -> Utterance {
        let mut entities = HashMap::new();

        let intent = if self.code_generation.is_match(raw) {
            Intent::CodeGeneration
        } else if self.code_explanation.is_match(raw) {
            Intent::CodeExplanation
        } else if self.debug_code.is_match(raw) {
            Intent::DebugCode
        } else if self.refactor_code.is_match(raw) {
            Intent::RefactorCode
        } else if self.add_file.is_match(raw) {
            self.extract_add_file_entities(raw, &mut entities);
            Intent::AddFile
        } else {
            Intent::Unknown
        };

        Self::extract_language(raw, &mut entities);

        debug!(?intent, entity_count = entities.len(), "Classified utterance");
        Utterance::new(raw, intent, entities)
    }
}
