//! Model gateway for CodeLoom.
//!
//! The gateway sits between the orchestrator and an opaque model backend.
//! It builds the structured prompt (system instructions, prior turns, a
//! workspace summary, the user text), enforces a timeout on the backend
//! call, and hands back the backend's reply as a [`ModelReply`].
//!
//! The gateway itself is pure given its inputs; all non-determinism lives
//! in the backend. Callers must not assume a repeated call with identical
//! input returns the same reply.

use codeloom_core::backend::{ModelBackend, ModelReply, PromptMessage, ToolDefinition};
use codeloom_core::error::GatewayError;
use codeloom_core::tool::ToolOutput;
use codeloom_core::turn::{ConversationTurn, Role};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// The standing instructions sent at the top of every prompt.
const SYSTEM_INSTRUCTIONS: &str = "You are a helpful AI coding assistant. You can write code, \
     explain code, debug issues, and use the available tools to access \
     workspace files.";

/// Default ceiling on one backend call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A bounded preview of one workspace file, assembled by the orchestrator.
#[derive(Debug, Clone)]
pub struct FilePreview {
    pub path: String,
    pub preview: String,
}

/// The per-turn context handed to the gateway: prior turns (all but the
/// in-flight one) plus previews of the workspace files.
///
/// Only the paths enter the prompt; the previews bound what the
/// orchestrator holds, and the prompt stays small either way.
#[derive(Debug, Clone, Default)]
pub struct TurnContext {
    pub history: Vec<ConversationTurn>,
    pub workspace_files: Vec<FilePreview>,
}

/// The gateway to the model backend.
pub struct ModelGateway {
    backend: Arc<dyn ModelBackend>,
    timeout: Duration,
}

impl ModelGateway {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            backend,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the ceiling on one backend call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured backend's name, for diagnostics.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Ask the backend for a reply to the user text.
    pub async fn query(
        &self,
        text: &str,
        context: &TurnContext,
        catalog: &[ToolDefinition],
    ) -> std::result::Result<ModelReply, GatewayError> {
        let prompt = self.build_prompt(text, context);
        debug!(
            entries = prompt.len(),
            tools = catalog.len(),
            backend = self.backend.name(),
            "Querying model"
        );
        self.call(&prompt, catalog).await
    }

    /// Continuation call: hand a tool result back to the backend so it can
    /// produce the final answer. Reconstructs the two-step exchange a
    /// function-calling API would have seen: the original prompt, a
    /// synthetic assistant tool-request entry, then the serialized result.
    pub async fn query_with_tool_result(
        &self,
        original_text: &str,
        context: &TurnContext,
        tool_name: &str,
        value: &ToolOutput,
        catalog: &[ToolDefinition],
    ) -> std::result::Result<ModelReply, GatewayError> {
        let mut prompt = self.build_prompt(original_text, context);
        prompt.push(PromptMessage::tool_request(tool_name));
        prompt.push(PromptMessage::tool_result(tool_name, value.to_wire()));
        debug!(
            tool_name,
            entries = prompt.len(),
            "Querying model with tool result"
        );
        self.call(&prompt, catalog).await
    }

    /// Assemble the ordered prompt: system instructions, prior turns, a
    /// paths-only workspace summary, then the user text.
    fn build_prompt(&self, text: &str, context: &TurnContext) -> Vec<PromptMessage> {
        let mut prompt = vec![PromptMessage::system(SYSTEM_INSTRUCTIONS)];

        for turn in &context.history {
            prompt.push(match turn.role {
                Role::User => PromptMessage::user(&turn.content),
                Role::Agent => PromptMessage::assistant(&turn.content),
            });
        }

        if !context.workspace_files.is_empty() {
            let mut summary = String::from("Current files in workspace:\n");
            for file in &context.workspace_files {
                summary.push_str(&format!("- {}\n", file.path));
            }
            prompt.push(PromptMessage::system(summary));
        }

        prompt.push(PromptMessage::user(text));
        prompt
    }

    async fn call(
        &self,
        prompt: &[PromptMessage],
        catalog: &[ToolDefinition],
    ) -> std::result::Result<ModelReply, GatewayError> {
        match tokio::time::timeout(self.timeout, self.backend.reply(prompt, catalog)).await {
            Ok(reply) => reply,
            Err(_) => Err(GatewayError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}
