//! Tool trait — the abstraction over workspace operations the model may
//! request.
//!
//! Tools are pure adapters over the workspace store: each one validates its
//! own arguments against its schema before touching the store, and is a
//! total function over its declared argument set.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::backend::ToolDefinition;
use crate::error::ToolError;

/// The successful payload of a tool execution.
///
/// Results are either a string or a list of strings; no nested or binary
/// payloads cross this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolOutput {
    /// A single text value
    Text(String),
    /// An ordered list of strings (e.g., workspace paths)
    Lines(Vec<String>),
}

impl ToolOutput {
    /// Serialize for embedding into a tool-result prompt entry.
    pub fn to_wire(&self) -> String {
        // Both variants are valid JSON values, so this cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Check that `arguments` is a flat object whose keys are all declared.
///
/// Tools call this before reading any argument, so an unknown key is
/// rejected prior to dispatch instead of being silently ignored. Missing
/// required keys are still each tool's own check.
pub fn reject_unknown_keys(
    arguments: &serde_json::Value,
    allowed: &[&str],
) -> std::result::Result<(), ToolError> {
    let Some(object) = arguments.as_object() else {
        return Err(ToolError::InvalidArguments(
            "arguments must be an object".into(),
        ));
    };
    if let Some(key) = object.keys().find(|k| !allowed.contains(&k.as_str())) {
        return Err(ToolError::InvalidArguments(format!(
            "unexpected argument: {key}"
        )));
    }
    Ok(())
}

/// The core Tool trait.
///
/// Each tool (read_file, add_file, list_files) implements this. Tools are
/// registered in the ToolRegistry and advertised to the model via
/// [`ToolDefinition`]s.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "read_file").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the model).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    ///
    /// Argument validation happens here, before any store access; a missing
    /// required argument fails without a side effect.
    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError>;

    /// Convert this tool into a ToolDefinition for the prompt catalog.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A registry of available tools, names unique.
///
/// The orchestrator uses this to:
/// 1. Get tool definitions to send to the model
/// 2. Look up and execute the one tool a reply may request
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Whether a tool with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get all tool definitions (for sending to the model).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.to_definition()).collect()
    }

    /// Execute a named tool.
    ///
    /// An unregistered name fails with [`ToolError::NotFound`] and causes no
    /// side effect.
    pub async fn execute(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(arguments).await
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
