//! Add file tool — create or overwrite a workspace file.
//!
//! Also invoked directly by the orchestrator's fast path, bypassing the
//! model, since file creation is deterministic and unambiguous.

use async_trait::async_trait;
use codeloom_core::error::ToolError;
use codeloom_core::tool::{reject_unknown_keys, Tool, ToolOutput};
use codeloom_core::workspace::WorkspaceStore;
use std::sync::Arc;
use tracing::debug;

pub struct AddFileTool {
    store: Arc<dyn WorkspaceStore>,
}

impl AddFileTool {
    pub fn new(store: Arc<dyn WorkspaceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for AddFileTool {
    fn name(&self) -> &str {
        "add_file"
    }

    fn description(&self) -> &str {
        "Adds a new file or overwrites an existing file in the workspace."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path for the new or existing file."
                },
                "content": {
                    "type": "string",
                    "description": "The content of the file."
                }
            },
            "required": ["file_path", "content"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        reject_unknown_keys(&arguments, &["file_path", "content"])?;
        let path = arguments["file_path"]
            .as_str()
            .ok_or(ToolError::MissingArgument("file_path"))?;
        let content = arguments["content"]
            .as_str()
            .ok_or(ToolError::MissingArgument("content"))?;

        self.store.add(path, content).await;
        debug!(path, bytes = content.len(), "add_file executed");

        Ok(ToolOutput::Text(format!(
            "File {path} added/updated successfully."
        )))
    }
}
