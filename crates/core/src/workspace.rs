//! WorkspaceStore trait — the in-memory file store boundary.
//!
//! The workspace is a key-value store of opaque path strings to opaque
//! content blobs. No filesystem semantics are implied: no directories, no
//! encoding negotiation, no persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file held in the workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceFile {
    /// Opaque path key
    pub path: String,

    /// Opaque content blob
    pub content: String,

    /// When the path was first added
    pub created_at: DateTime<Utc>,

    /// When the content was last overwritten
    pub updated_at: DateTime<Utc>,
}

/// The workspace store boundary.
///
/// Reads on missing paths are a distinguished `None`, never an error. All
/// operations are total over their argument sets. Implementations must keep
/// `list()` in insertion order, with an overwrite retaining the original
/// position.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// A human-readable name for this store (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Add a file, overwriting any existing content at the same path.
    async fn add(&self, path: &str, content: &str);

    /// Read a file's content, or `None` if the path is absent.
    async fn read(&self, path: &str) -> Option<String>;

    /// All paths, in insertion order.
    async fn list(&self) -> Vec<String>;

    /// Remove a file. Returns whether the path was present.
    async fn remove(&self, path: &str) -> bool;

    /// Full path/content snapshot in insertion order, for context previews.
    async fn snapshot(&self) -> Vec<WorkspaceFile>;

    /// Number of files currently held.
    async fn count(&self) -> usize {
        self.list().await.len()
    }
}
