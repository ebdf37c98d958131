//! Conversation turn domain types.
//!
//! A turn is one user utterance plus the agent's resulting response. The
//! [`ConversationLog`] is the ordered, append-only record of turns; order is
//! semantically significant because the log is the model's context window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The assistant
    Agent,
}

/// A single entry in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who said it
    pub role: Role,

    /// The text content
    pub content: String,

    /// When it was appended
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an agent turn.
    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only ordered record of a session's turns.
///
/// Entries persist for the process lifetime; there is no eviction and no
/// size bound.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one turn.
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// The single value a turn surfaces to the caller.
///
/// Never partially populated: a turn produces exactly one of these, and the
/// rendered text is what gets appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnResult {
    /// A normal answer (text or code)
    Answer(String),
    /// A recovered fault, rendered with a distinct prefix
    ErrorReport(String),
}

impl TurnResult {
    /// Format for presentation. Errors get a distinct prefix; answers pass
    /// through untouched.
    pub fn render(&self) -> String {
        match self {
            TurnResult::Answer(text) => text.clone(),
            TurnResult::ErrorReport(text) => format!("An error occurred: {text}"),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TurnResult::ErrorReport(_))
    }
}
