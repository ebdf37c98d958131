//! Model backend implementations for CodeLoom.
//!
//! The gateway treats every backend as an opaque [`ModelBackend`]. Two are
//! provided:
//! - [`RuleBasedBackend`] — a local, keyword-routed backend; no network, no
//!   API key, useful offline and as the default.
//! - [`ScriptedBackend`] — replays a fixed sequence of replies and counts
//!   calls; the deterministic double for tests.

pub mod rule_based;
pub mod scripted;

pub use rule_based::RuleBasedBackend;
pub use scripted::ScriptedBackend;
