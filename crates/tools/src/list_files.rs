//! List files tool — enumerate workspace paths in insertion order.

use async_trait::async_trait;
use codeloom_core::error::ToolError;
use codeloom_core::tool::{reject_unknown_keys, Tool, ToolOutput};
use codeloom_core::workspace::WorkspaceStore;
use std::sync::Arc;

pub struct ListFilesTool {
    store: Arc<dyn WorkspaceStore>,
}

impl ListFilesTool {
    pub fn new(store: Arc<dyn WorkspaceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "Lists all files currently held in the workspace."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        reject_unknown_keys(&arguments, &[])?;
        Ok(ToolOutput::Lines(self.store.list().await))
    }
}
