//! # CodeLoom Core
//!
//! Domain types, traits, and error definitions for the CodeLoom
//! conversational coding assistant. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every seam is defined as a trait here: intent classification
//! ([`Classifier`]), the language-model boundary ([`ModelBackend`]), the
//! workspace store ([`WorkspaceStore`]), and callable tools ([`Tool`]).
//! Implementations live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Deterministic testing with scripted/fixed implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod backend;
pub mod error;
pub mod tool;
pub mod turn;
pub mod utterance;
pub mod workspace;

// Re-export key types at crate root for ergonomics
pub use backend::{ModelBackend, ModelReply, PromptMessage, PromptRole, ToolDefinition};
pub use error::{Error, GatewayError, Result, ToolError};
pub use tool::{reject_unknown_keys, Tool, ToolOutput, ToolRegistry};
pub use turn::{ConversationLog, ConversationTurn, Role, TurnResult};
pub use utterance::{Classifier, Intent, Utterance};
pub use workspace::{WorkspaceFile, WorkspaceStore};
