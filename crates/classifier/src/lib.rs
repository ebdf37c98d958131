//! Intent and entity extraction for CodeLoom.
//!
//! Classification is a pluggable seam: the production adapter here is
//! rule-based (keyword and pattern heuristics), and a fixed-output adapter
//! is provided for deterministic tests. A learned classifier would slot in
//! behind the same [`Classifier`] trait.

pub mod fixed;
pub mod rules;

pub use fixed::FixedClassifier;
pub use rules::RuleClassifier;

#[doc(inline)]
pub use codeloom_core::utterance::Classifier;
