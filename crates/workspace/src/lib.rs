//! In-memory workspace store for CodeLoom.
//!
//! Holds the files the assistant can inspect and modify during a session.
//! Nothing is persisted: the store lives and dies with the process, which is
//! all the assistant's workspace contract requires.

use async_trait::async_trait;
use chrono::Utc;
use codeloom_core::workspace::{WorkspaceFile, WorkspaceStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// An in-memory store that keeps files in a Vec, preserving insertion order.
///
/// Mutations are serialized behind an async `RwLock`, so `add`/`remove`
/// cannot interleave if a future caller runs turns concurrently.
pub struct InMemoryWorkspace {
    files: Arc<RwLock<Vec<WorkspaceFile>>>,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkspaceStore for InMemoryWorkspace {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn add(&self, path: &str, content: &str) {
        let mut files = self.files.write().await;
        if let Some(existing) = files.iter_mut().find(|f| f.path == path) {
            // Overwrite in place; the insertion position is retained.
            existing.content = content.to_string();
            existing.updated_at = Utc::now();
            debug!(path, bytes = content.len(), "Workspace file overwritten");
        } else {
            let now = Utc::now();
            files.push(WorkspaceFile {
                path: path.to_string(),
                content: content.to_string(),
                created_at: now,
                updated_at: now,
            });
            debug!(path, bytes = content.len(), "Workspace file added");
        }
    }

    async fn read(&self, path: &str) -> Option<String> {
        let files = self.files.read().await;
        files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.clone())
    }

    async fn list(&self) -> Vec<String> {
        let files = self.files.read().await;
        files.iter().map(|f| f.path.clone()).collect()
    }

    async fn remove(&self, path: &str) -> bool {
        let mut files = self.files.write().await;
        let len_before = files.len();
        files.retain(|f| f.path != path);
        let removed = files.len() < len_before;
        if removed {
            debug!(path, "Workspace file removed");
        }
        removed
    }

    async fn snapshot(&self) -> Vec<WorkspaceFile> {
        self.files.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_and_read() {
        let ws = InMemoryWorkspace::new();
        ws.add("example.py", "def hello():\n  print('hi')").await;

        let content = ws.read("example.py").await;
        assert_eq!(content.as_deref(), Some("def hello():\n  print('hi')"));
    }

    #[tokio::test]
    async fn read_missing_is_none() {
        let ws = InMemoryWorkspace::new();
        assert_eq!(ws.read("nope.py").await, None);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let ws = InMemoryWorkspace::new();
        ws.add("b.py", "2").await;
        ws.add("a.py", "1").await;
        ws.add("c.py", "3").await;

        assert_eq!(ws.list().await, vec!["b.py", "a.py", "c.py"]);
    }

    #[tokio::test]
    async fn overwrite_keeps_position_and_updates_content() {
        let ws = InMemoryWorkspace::new();
        ws.add("a.py", "old").await;
        ws.add("b.py", "other").await;
        ws.add("a.py", "new").await;

        assert_eq!(ws.list().await, vec!["a.py", "b.py"]);
        assert_eq!(ws.read("a.py").await.as_deref(), Some("new"));
        assert_eq!(ws.count().await, 2);
    }

    #[tokio::test]
    async fn remove_reports_presence() {
        let ws = InMemoryWorkspace::new();
        ws.add("a.py", "x").await;

        assert!(ws.remove("a.py").await);
        assert!(!ws.remove("a.py").await);
        assert_eq!(ws.count().await, 0);
    }

    #[tokio::test]
    async fn snapshot_matches_contents() {
        let ws = InMemoryWorkspace::new();
        ws.add("a.py", "alpha").await;
        ws.add("b.py", "beta").await;

        let snap = ws.snapshot().await;
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].path, "a.py");
        assert_eq!(snap[0].content, "alpha");
        assert_eq!(snap[1].path, "b.py");
        assert!(snap[0].created_at <= snap[0].updated_at);
    }
}
