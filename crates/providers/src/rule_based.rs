//! Rule-based local backend — keyword routing over the prompt.
//!
//! Stands in for a hosted model: it reads the assembled prompt the same way
//! a function-calling API would, answers a handful of coding requests with
//! canned text, and requests workspace tools when the user asks about
//! files. A tool-result entry at the end of the prompt switches it into
//! continuation mode, where it summarizes the result as a final answer.

use async_trait::async_trait;
use codeloom_core::backend::{ModelBackend, ModelReply, PromptMessage, PromptRole, ToolDefinition};
use codeloom_core::error::GatewayError;
use codeloom_core::tool::ToolOutput;
use tracing::debug;

pub struct RuleBasedBackend;

impl RuleBasedBackend {
    pub fn new() -> Self {
        Self
    }

    /// Pull a file-like token (one containing an interior dot) out of the
    /// user text, e.g. "example.py" from "read the file example.py".
    fn find_file_token(text: &str) -> Option<String> {
        text.split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric() && c != '_'))
            .find(|word| {
                let dot = word.find('.');
                matches!(dot, Some(i) if i > 0 && i < word.len() - 1)
            })
            .map(str::to_string)
    }

    fn catalog_has(tools: &[ToolDefinition], name: &str) -> bool {
        tools.iter().any(|t| t.name == name)
    }

    /// Continuation mode: the prompt ends with a tool result; summarize it.
    fn reply_to_tool_result(tool_name: &str, serialized: &str) -> ModelReply {
        let parsed: Option<ToolOutput> = serde_json::from_str(serialized).ok();
        match (tool_name, parsed) {
            ("read_file", Some(ToolOutput::Text(content))) => ModelReply::answer(format!(
                "I read the requested file. Its contents are:\n```\n{content}\n```\nWhat would you like to do with it?"
            )),
            ("list_files", Some(ToolOutput::Lines(paths))) => {
                if paths.is_empty() {
                    ModelReply::answer("The workspace is empty.")
                } else {
                    ModelReply::answer(format!(
                        "The files in the workspace are: {}.",
                        paths.join(", ")
                    ))
                }
            }
            ("add_file", Some(ToolOutput::Text(confirmation))) => {
                ModelReply::answer(confirmation)
            }
            _ => ModelReply::answer(format!(
                "I have processed the result from the tool '{tool_name}'."
            )),
        }
    }

    /// Initial mode: route on keywords in the latest user entry.
    fn reply_to_query(user_text: &str, tools: &[ToolDefinition]) -> ModelReply {
        let lower = user_text.to_lowercase();

        if lower.contains("generate python code for sum") {
            return ModelReply::answer(
                "```python\ndef sum_list(numbers):\n  total = 0\n  for number in numbers:\n    total += number\n  return total\n```",
            );
        }

        if lower.contains("explain this python code") && lower.contains("def hello") {
            return ModelReply::answer(
                "This Python code defines a function `hello` that prints a greeting.",
            );
        }

        if lower.contains("read the file") && Self::catalog_has(tools, "read_file") {
            if let Some(path) = Self::find_file_token(user_text) {
                return ModelReply::tool_request(
                    "read_file",
                    serde_json::json!({ "file_path": path }),
                );
            }
        }

        if (lower.contains("files in the workspace") || lower.starts_with("list files"))
            && Self::catalog_has(tools, "list_files")
        {
            return ModelReply::tool_request("list_files", serde_json::json!({}));
        }

        ModelReply::answer(
            "I can generate code, explain code, and work with your workspace files. \
             Try asking me to read a file or list the files in the workspace.",
        )
    }
}

impl Default for RuleBasedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelBackend for RuleBasedBackend {
    fn name(&self) -> &str {
        "rule-based"
    }

    async fn reply(
        &self,
        prompt: &[PromptMessage],
        tools: &[ToolDefinition],
    ) -> std::result::Result<ModelReply, GatewayError> {
        // Continuation: a trailing tool-result entry takes precedence.
        if let Some(last) = prompt.last()
            && last.role == PromptRole::Tool
        {
            let tool_name = last.tool_name.as_deref().unwrap_or_default();
            debug!(tool_name, "Replying to tool result");
            return Ok(Self::reply_to_tool_result(tool_name, &last.content));
        }

        let user_text = prompt
            .iter()
            .rev()
            .find(|m| m.role == PromptRole::User)
            .map(|m| m.content.as_str())
            .ok_or_else(|| GatewayError::Malformed("prompt contains no user entry".into()))?;

        debug!(tool_count = tools.len(), "Replying to user query");
        Ok(Self::reply_to_query(user_text, tools))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<ToolDefinition> {
        ["read_file", "add_file", "list_files"]
            .into_iter()
            .map(|name| ToolDefinition {
                name: name.into(),
                description: String::new(),
                parameters: serde_json::json!({"type": "object", "properties": {}}),
            })
            .collect()
    }

    fn user_prompt(text: &str) -> Vec<PromptMessage> {
        vec![
            PromptMessage::system("You are a coding assistant."),
            PromptMessage::user(text),
        ]
    }

    #[tokio::test]
    async fn sum_request_gets_code() {
        let backend = RuleBasedBackend::new();
        let reply = backend
            .reply(
                &user_prompt("Hey, can you generate python code for sum of a list?"),
                &catalog(),
            )
            .await
            .unwrap();
        match reply {
            ModelReply::FinalAnswer { text } => assert!(text.contains("def sum_list")),
            other => panic!("expected answer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn read_request_becomes_tool_request() {
        let backend = RuleBasedBackend::new();
        let reply = backend
            .reply(
                &user_prompt("Now, please read the file example.py and tell me about it."),
                &catalog(),
            )
            .await
            .unwrap();
        assert_eq!(
            reply,
            ModelReply::tool_request("read_file", serde_json::json!({"file_path": "example.py"}))
        );
    }

    #[tokio::test]
    async fn read_request_without_catalog_falls_through() {
        let backend = RuleBasedBackend::new();
        let reply = backend
            .reply(&user_prompt("read the file example.py"), &[])
            .await
            .unwrap();
        assert!(matches!(reply, ModelReply::FinalAnswer { .. }));
    }

    #[tokio::test]
    async fn workspace_question_becomes_list_files() {
        let backend = RuleBasedBackend::new();
        let reply = backend
            .reply(
                &user_prompt("What files are in the workspace?"),
                &catalog(),
            )
            .await
            .unwrap();
        assert_eq!(
            reply,
            ModelReply::tool_request("list_files", serde_json::json!({}))
        );
    }

    #[tokio::test]
    async fn tool_result_continuation_for_list_files() {
        let backend = RuleBasedBackend::new();
        let mut prompt = user_prompt("What files are in the workspace?");
        prompt.push(PromptMessage::tool_request("list_files"));
        prompt.push(PromptMessage::tool_result("list_files", "[\"x.py\"]"));

        let reply = backend.reply(&prompt, &catalog()).await.unwrap();
        match reply {
            ModelReply::FinalAnswer { text } => assert!(text.contains("x.py")),
            other => panic!("expected answer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn tool_result_continuation_for_read_file() {
        let backend = RuleBasedBackend::new();
        let mut prompt = user_prompt("read the file a.py");
        prompt.push(PromptMessage::tool_request("read_file"));
        prompt.push(PromptMessage::tool_result("read_file", "\"print(1)\""));

        let reply = backend.reply(&prompt, &catalog()).await.unwrap();
        match reply {
            ModelReply::FinalAnswer { text } => assert!(text.contains("print(1)")),
            other => panic!("expected answer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_prompt_is_malformed() {
        let backend = RuleBasedBackend::new();
        let err = backend.reply(&[], &catalog()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Malformed(_)));
    }

    #[test]
    fn file_token_extraction() {
        assert_eq!(
            RuleBasedBackend::find_file_token("read the file example.py please"),
            Some("example.py".into())
        );
        assert_eq!(
            RuleBasedBackend::find_file_token("read the file 'notes.txt'."),
            Some("notes.txt".into())
        );
        assert_eq!(RuleBasedBackend::find_file_token("no file here."), None);
    }
}
