//! The turn orchestrator — one utterance in, one result out.

use codeloom_core::backend::ModelReply;
use codeloom_core::error::ToolError;
use codeloom_core::tool::{ToolOutput, ToolRegistry};
use codeloom_core::turn::{ConversationTurn, TurnResult};
use codeloom_core::utterance::{Intent, Utterance, ENTITY_CONTENT, ENTITY_FILE_PATH};
use codeloom_core::workspace::WorkspaceStore;
use codeloom_gateway::{FilePreview, ModelGateway, TurnContext};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How much of each workspace file the assembled context carries.
const DEFAULT_PREVIEW_CHARS: usize = 100;

/// Guidance returned when a file add is missing its content.
const ADD_FILE_HELP: &str = "You asked to add a file, but didn't provide content. \
     Example: add file \"test.py\" with content \"print('hello')\"";

/// The phases one turn moves through. Acyclic: a phase is never revisited
/// within a turn, and every turn ends in `Done` with exactly one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    AwaitingModel,
    AwaitingTool,
    AwaitingModelWithResult,
    Done,
}

/// Drives the single-round tool-call protocol between the gateway and the
/// tool registry.
pub struct TurnOrchestrator {
    gateway: ModelGateway,
    tools: Arc<ToolRegistry>,
    workspace: Arc<dyn WorkspaceStore>,
    preview_chars: usize,
}

impl TurnOrchestrator {
    pub fn new(
        gateway: ModelGateway,
        tools: Arc<ToolRegistry>,
        workspace: Arc<dyn WorkspaceStore>,
    ) -> Self {
        Self {
            gateway,
            tools,
            workspace,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    /// Set how many characters of each file enter the turn context.
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    fn advance(phase: &mut TurnPhase, next: TurnPhase) {
        debug!(from = ?phase, to = ?next, "Turn phase");
        *phase = next;
    }

    /// Handle one classified utterance against the given history.
    ///
    /// Always returns exactly one result; every fault along the way is
    /// converted to an error report here, never propagated.
    pub async fn handle_turn(
        &self,
        utterance: &Utterance,
        history: &[ConversationTurn],
    ) -> TurnResult {
        let mut phase = TurnPhase::Idle;
        info!(intent = ?utterance.intent, "Handling turn");

        // Deterministic file adds skip the model entirely; it adds no value
        // to a purely mechanical operation.
        if utterance.intent == Intent::AddFile {
            match (
                utterance.entity(ENTITY_FILE_PATH),
                utterance.entity(ENTITY_CONTENT),
            ) {
                (Some(path), Some(content)) => {
                    Self::advance(&mut phase, TurnPhase::Done);
                    return self.fast_path_add(path, content).await;
                }
                (Some(_), None) => {
                    Self::advance(&mut phase, TurnPhase::Done);
                    return TurnResult::ErrorReport(ADD_FILE_HELP.into());
                }
                // No usable path entity; let the model sort it out.
                _ => {}
            }
        }

        let context = self.assemble_context(history).await;
        let catalog = self.tools.definitions();

        Self::advance(&mut phase, TurnPhase::AwaitingModel);
        let reply = match self.gateway.query(&utterance.raw, &context, &catalog).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Model query failed");
                Self::advance(&mut phase, TurnPhase::Done);
                return TurnResult::ErrorReport(e.to_string());
            }
        };

        let (name, arguments) = match reply {
            ModelReply::FinalAnswer { text } => {
                Self::advance(&mut phase, TurnPhase::Done);
                return TurnResult::Answer(text);
            }
            ModelReply::ToolRequest { name, arguments } => (name, arguments),
        };

        // A request for an unregistered tool is reported, never executed.
        if !self.tools.contains(&name) {
            warn!(tool = %name, "Backend requested unknown tool");
            Self::advance(&mut phase, TurnPhase::Done);
            return TurnResult::ErrorReport(ToolError::NotFound(name).to_string());
        }

        Self::advance(&mut phase, TurnPhase::AwaitingTool);
        info!(tool = %name, "Executing requested tool");
        let value = match self.tools.execute(&name, arguments).await {
            Ok(value) => value,
            Err(e) => {
                // No second model call on a broken tool; that way lies a loop.
                warn!(tool = %name, error = %e, "Tool execution failed");
                Self::advance(&mut phase, TurnPhase::Done);
                return TurnResult::ErrorReport(e.to_string());
            }
        };

        Self::advance(&mut phase, TurnPhase::AwaitingModelWithResult);
        let continuation = match self
            .gateway
            .query_with_tool_result(&utterance.raw, &context, &name, &value, &catalog)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Continuation query failed");
                Self::advance(&mut phase, TurnPhase::Done);
                return TurnResult::ErrorReport(e.to_string());
            }
        };

        Self::advance(&mut phase, TurnPhase::Done);
        match continuation {
            ModelReply::FinalAnswer { text } => TurnResult::Answer(text),
            ModelReply::ToolRequest {
                name: follow_up, ..
            } => {
                // One tool call per turn; a second request is not chained.
                warn!(tool = %follow_up, "Backend requested a second tool; not chaining");
                TurnResult::Answer(format!(
                    "I ran '{name}' for you. A further '{follow_up}' call would be \
                     needed to go deeper; ask me to continue if you'd like."
                ))
            }
        }
    }

    /// The fast path: invoke `add_file` directly, no model round trip.
    async fn fast_path_add(&self, path: &str, content: &str) -> TurnResult {
        info!(path, "Fast path: adding file without model call");
        let arguments = serde_json::json!({
            "file_path": path,
            "content": content,
        });
        match self.tools.execute("add_file", arguments).await {
            Ok(ToolOutput::Text(confirmation)) => TurnResult::Answer(confirmation),
            Ok(ToolOutput::Lines(lines)) => TurnResult::Answer(lines.join("\n")),
            Err(e) => TurnResult::ErrorReport(e.to_string()),
        }
    }

    /// Prior turns plus a bounded preview of each workspace file.
    async fn assemble_context(&self, history: &[ConversationTurn]) -> TurnContext {
        let files = self.workspace.snapshot().await;
        let workspace_files = files
            .into_iter()
            .map(|f| FilePreview {
                preview: f.content.chars().take(self.preview_chars).collect(),
                path: f.path,
            })
            .collect();
        TurnContext {
            history: history.to_vec(),
            workspace_files,
        }
    }
}
