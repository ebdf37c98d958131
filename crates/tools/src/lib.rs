//! Built-in tool implementations for CodeLoom.
//!
//! Tools are the operations the model may request against the workspace:
//! read a file, add a file, list what is there. Each tool is a thin adapter
//! over the [`WorkspaceStore`] boundary and validates its own arguments
//! before touching the store.

pub mod add_file;
pub mod list_files;
pub mod read_file;

use codeloom_core::tool::ToolRegistry;
use codeloom_core::workspace::WorkspaceStore;
use std::sync::Arc;

pub use add_file::AddFileTool;
pub use list_files::ListFilesTool;
pub use read_file::ReadFileTool;

/// Create the default tool registry over a workspace store.
pub fn default_registry(store: Arc<dyn WorkspaceStore>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ReadFileTool::new(store.clone())));
    registry.register(Box::new(AddFileTool::new(store.clone())));
    registry.register(Box::new(ListFilesTool::new(store)));
    registry
}
