//! Read file tool — fetch one file's content from the workspace.

use async_trait::async_trait;
use codeloom_core::error::ToolError;
use codeloom_core::tool::{reject_unknown_keys, Tool, ToolOutput};
use codeloom_core::workspace::WorkspaceStore;
use std::sync::Arc;

pub struct ReadFileTool {
    store: Arc<dyn WorkspaceStore>,
}

impl ReadFileTool {
    pub fn new(store: Arc<dyn WorkspaceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Reads the content of a specified file from the workspace."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path to the file to read."
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        reject_unknown_keys(&arguments, &["file_path"])?;
        let path = arguments["file_path"]
            .as_str()
            .ok_or(ToolError::MissingArgument("file_path"))?;

        match self.store.read(path).await {
            Some(content) => Ok(ToolOutput::Text(content)),
            None => Err(ToolError::ExecutionFailed {
                tool_name: "read_file".into(),
                reason: format!("no such file in workspace: {path}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeloom_workspace::InMemoryWorkspace;

    fn tool_with_store() -> (ReadFileTool, Arc<dyn WorkspaceStore>) {
        let store: Arc<dyn WorkspaceStore> = Arc::new(InMemoryWorkspace::new());
        (ReadFileTool::new(store.clone()), store)
    }

    #[test]
    fn tool_definition() {
        let (tool, _) = tool_with_store();
        assert_eq!(tool.name(), "read_file");
        let schema = tool.parameters_schema();
        assert_eq!(schema["required"], serde_json::json!(["file_path"]));
    }

    #[tokio::test]
    async fn reads_existing_file() {
        let (tool, store) = tool_with_store();
        store.add("example.py", "print('hello')").await;

        let out = tool
            .execute(serde_json::json!({"file_path": "example.py"}))
            .await
            .unwrap();
        assert_eq!(out, ToolOutput::Text("print('hello')".into()));
    }

    #[tokio::test]
    async fn missing_file_is_a_failure() {
        let (tool, _) = tool_with_store();
        let err = tool
            .execute(serde_json::json!({"file_path": "nope.py"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed { .. }));
        assert!(err.to_string().contains("nope.py"));
    }

    #[tokio::test]
    async fn missing_argument() {
        let (tool, _) = tool_with_store();
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument("file_path")));
    }

    #[tokio::test]
    async fn unexpected_argument_is_rejected() {
        let (tool, store) = tool_with_store();
        store.add("a.py", "X").await;

        let err = tool
            .execute(serde_json::json!({"file_path": "a.py", "mode": "binary"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
