//! Scripted backend — replays fixed replies, for deterministic tests.

use async_trait::async_trait;
use codeloom_core::backend::{ModelBackend, ModelReply, PromptMessage, ToolDefinition};
use codeloom_core::error::GatewayError;
use std::sync::Mutex;

/// One scripted outcome: a reply or a gateway fault.
pub type ScriptedReply = std::result::Result<ModelReply, GatewayError>;

/// A backend that returns a fixed sequence of replies and counts calls.
///
/// Each call to `reply` consumes the next scripted entry. Panics if more
/// calls are made than entries were provided; tests that assert "no model
/// call happens" script an empty sequence and check [`call_count`].
///
/// [`call_count`]: ScriptedBackend::call_count
pub struct ScriptedBackend {
    replies: Mutex<Vec<ScriptedReply>>,
    call_count: Mutex<usize>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies),
            call_count: Mutex::new(0),
        }
    }

    /// A backend scripted to never be called.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A backend that returns a single text answer.
    pub fn single_answer(text: &str) -> Self {
        Self::new(vec![Ok(ModelReply::answer(text))])
    }

    /// A backend that first requests one tool, then answers.
    pub fn tool_then_answer(name: &str, arguments: serde_json::Value, answer: &str) -> Self {
        Self::new(vec![
            Ok(ModelReply::tool_request(name, arguments)),
            Ok(ModelReply::answer(answer)),
        ])
    }

    /// A backend whose single reply is a gateway fault.
    pub fn single_failure(error: GatewayError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// How many times `reply` was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn reply(
        &self,
        _prompt: &[PromptMessage],
        _tools: &[ToolDefinition],
    ) -> std::result::Result<ModelReply, GatewayError> {
        let mut count = self.call_count.lock().unwrap();
        let replies = self.replies.lock().unwrap();

        if *count >= replies.len() {
            panic!(
                "ScriptedBackend: no more replies (call #{}, have {})",
                *count,
                replies.len()
            );
        }

        let reply = replies[*count].clone();
        *count += 1;
        reply
    }
}
