//! ModelBackend trait — the abstraction over the language-model boundary.
//!
//! A backend receives an ordered prompt plus the tool catalog and replies
//! with either a final answer or exactly one tool request. The backend is
//! treated as opaque and non-deterministic: callers must not assume that
//! repeating a call with identical input yields the same reply.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// The role of a prompt entry, mirroring a function-calling chat API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    /// Instructions and ambient context
    System,
    /// The end user
    User,
    /// The model's own prior output (including synthetic tool-request entries)
    Assistant,
    /// A tool execution result
    Tool,
}

/// One entry in the ordered prompt sent to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Who this entry speaks as
    pub role: PromptRole,

    /// The text content (serialized JSON for tool results)
    pub content: String,

    /// For assistant tool-request and tool-result entries, which tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl PromptMessage {
    /// Create a system entry.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
            tool_name: None,
        }
    }

    /// Create a user entry.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
            tool_name: None,
        }
    }

    /// Create an assistant entry.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::Assistant,
            content: content.into(),
            tool_name: None,
        }
    }

    /// Create the synthetic assistant entry recording that a tool was
    /// requested, for the result-continuation prompt.
    pub fn tool_request(tool_name: impl Into<String>) -> Self {
        let tool_name = tool_name.into();
        Self {
            role: PromptRole::Assistant,
            content: format!("Requested tool '{tool_name}'."),
            tool_name: Some(tool_name),
        }
    }

    /// Create a tool-result entry carrying the serialized tool value.
    pub fn tool_result(tool_name: impl Into<String>, serialized: impl Into<String>) -> Self {
        Self {
            role: PromptRole::Tool,
            content: serialized.into(),
            tool_name: Some(tool_name.into()),
        }
    }
}

/// A tool definition sent to the backend so it knows what it can request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// What a backend reply classifies into.
///
/// Exactly one tool request can appear per reply; the orchestrator never
/// interprets multiple simultaneous requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelReply {
    /// A direct answer; ends the turn
    FinalAnswer { text: String },
    /// A request to execute one registered tool
    ToolRequest {
        name: String,
        arguments: serde_json::Value,
    },
}

impl ModelReply {
    /// Convenience constructor for a text answer.
    pub fn answer(text: impl Into<String>) -> Self {
        ModelReply::FinalAnswer { text: text.into() }
    }

    /// Convenience constructor for a tool request.
    pub fn tool_request(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        ModelReply::ToolRequest {
            name: name.into(),
            arguments,
        }
    }
}

/// The core ModelBackend trait.
///
/// Every model integration implements this. The gateway calls `reply()`
/// without knowing which backend is configured; tests substitute a scripted
/// backend implementing the same interface.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// A human-readable name for this backend (e.g., "rule-based").
    fn name(&self) -> &str;

    /// Produce a reply for the given prompt and tool catalog.
    async fn reply(
        &self,
        prompt: &[PromptMessage],
        tools: &[ToolDefinition],
    ) -> std::result::Result<ModelReply, GatewayError>;
}
