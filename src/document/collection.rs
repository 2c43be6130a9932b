//! The document collection and its current-document pointer.

use super::{Document, HistoryEntry};
use crate::error::{Error, Result};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Maximum number of history snapshots kept per document.
pub const MAX_HISTORY: usize = 10;

const WELCOME_TITLE: &str = "Welcome";

const WELCOME_CONTENT: &str = r#"# Welcome to mdpress

Write markdown on the left, copy styled HTML on the right.

## Features

- Themes with a configurable **primary color**, font and size
- Code blocks with highlighting, an optional window bar and line numbers
- Links turned into numbered citations for platforms that strip them

```rust
fn main() {
    println!("Hello, mdpress!");
}
```

> Everything you copy carries its styles inline.
"#;

/// All documents plus the id of the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCollection {
    posts: Vec<Document>,
    #[serde(default)]
    current_post_id: String,
}

impl Default for DocumentCollection {
    fn default() -> Self {
        let welcome = Document::new(WELCOME_TITLE, WELCOME_CONTENT);
        Self {
            current_post_id: welcome.id.clone(),
            posts: vec![welcome],
        }
    }
}

impl DocumentCollection {
    /// A collection with no documents at all.
    pub fn empty() -> Self {
        Self {
            posts: Vec::new(),
            current_post_id: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.posts.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn current_id(&self) -> &str {
        &self.current_post_id
    }

    pub fn current(&self) -> Option<&Document> {
        self.get(&self.current_post_id)
    }

    /// Documents whose parent is `parent_id` (`None` for top level).
    pub fn children_of<'a>(
        &'a self,
        parent_id: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Document> + 'a {
        self.posts
            .iter()
            .filter(move |p| p.parent_id.as_deref() == parent_id)
    }

    /// Create a document titled `title` and make it current.
    ///
    /// Returns the new document's id.
    pub fn add(&mut self, title: &str, parent_id: Option<String>) -> String {
        let doc = Document::new(title, format!("# {}", title)).with_parent(parent_id);
        let id = doc.id.clone();
        info!("Added document '{}' ({})", title, id);
        self.posts.push(doc);
        self.current_post_id = id.clone();
        id
    }

    /// Change a document's title.
    pub fn rename(&mut self, id: &str, title: &str) -> Result<()> {
        let doc = self.get_mut(id)?;
        doc.title = title.to_string();
        doc.updated_at = Utc::now();
        Ok(())
    }

    /// Replace a document's content.
    pub fn update_content(&mut self, id: &str, content: &str) -> Result<()> {
        let doc = self.get_mut(id)?;
        if doc.content != content {
            doc.content = content.to_string();
            doc.updated_at = Utc::now();
        }
        Ok(())
    }

    /// Move a document under another parent (or to the top level).
    pub fn set_parent(&mut self, id: &str, parent_id: Option<String>) -> Result<()> {
        if parent_id.as_deref() == Some(id) {
            return Err(Error::configuration("a document cannot be its own parent"));
        }
        let doc = self.get_mut(id)?;
        doc.parent_id = parent_id;
        doc.updated_at = Utc::now();
        Ok(())
    }

    /// Append a snapshot of the document's current content to its history.
    ///
    /// Nothing is recorded when the content equals the latest snapshot. When
    /// the history exceeds `MAX_HISTORY`, the oldest snapshots are dropped.
    pub fn record_snapshot(&mut self, id: &str) -> Result<()> {
        let doc = self.get_mut(id)?;
        if doc
            .latest_snapshot()
            .is_some_and(|entry| entry.content == doc.content)
        {
            return Ok(());
        }
        doc.history.push(HistoryEntry {
            timestamp: Utc::now(),
            content: doc.content.clone(),
        });
        let overflow = doc.history.len().saturating_sub(MAX_HISTORY);
        doc.history.drain(..overflow);
        debug!("Recorded snapshot for {} ({} kept)", id, doc.history.len());
        Ok(())
    }

    /// Remove a document. If it was current, its neighbour becomes current.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let index = self
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))?;
        self.posts.remove(index);

        if self.current_post_id == id {
            self.current_post_id = self
                .posts
                .get(index.min(self.posts.len().saturating_sub(1)))
                .map(|p| p.id.clone())
                .unwrap_or_default();
        }
        info!("Deleted document {}", id);
        Ok(())
    }

    /// Make a document current.
    pub fn set_current(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(Error::DocumentNotFound(id.to_string()));
        }
        self.current_post_id = id.to_string();
        Ok(())
    }

    pub fn collapse_all(&mut self) {
        self.posts.iter_mut().for_each(|p| p.collapsed = true);
    }

    pub fn expand_all(&mut self) {
        self.posts.iter_mut().for_each(|p| p.collapsed = false);
    }

    /// Repair the current pointer after loading from storage.
    pub fn rehydrate(&mut self) {
        if self.current().is_none() {
            self.current_post_id = self
                .posts
                .first()
                .map(|p| p.id.clone())
                .unwrap_or_default();
        }
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Document> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_collection_has_current_welcome() {
        let collection = DocumentCollection::default();
        assert_eq!(collection.len(), 1);
        let current = collection.current().unwrap();
        assert_eq!(current.title, WELCOME_TITLE);
        assert!(current.content.starts_with("# Welcome"));
    }

    #[test]
    fn test_add_sets_heading_content_and_current() {
        let mut collection = DocumentCollection::default();
        let id = collection.add("Draft", None);
        let doc = collection.get(&id).unwrap();
        assert_eq!(doc.content, "# Draft");
        assert_eq!(doc.history.len(), 1);
        assert_eq!(collection.current_id(), id);
    }

    #[test]
    fn test_rename_updates_title_and_timestamp() {
        let mut collection = DocumentCollection::default();
        let id = collection.add("Old", None);
        let before = collection.get(&id).unwrap().updated_at;
        collection.rename(&id, "New").unwrap();
        let doc = collection.get(&id).unwrap();
        assert_eq!(doc.title, "New");
        assert!(doc.updated_at >= before);
        assert_eq!(doc.content, "# Old");
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let mut collection = DocumentCollection::default();
        assert!(matches!(
            collection.rename("missing", "x"),
            Err(Error::DocumentNotFound(_))
        ));
        assert!(collection.set_current("missing").is_err());
        assert!(collection.delete("missing").is_err());
    }

    #[test]
    fn test_update_content_does_not_touch_history() {
        let mut collection = DocumentCollection::default();
        let id = collection.add("Doc", None);
        collection.update_content(&id, "changed").unwrap();
        let doc = collection.get(&id).unwrap();
        assert_eq!(doc.content, "changed");
        assert_eq!(doc.history.len(), 1);
        assert_eq!(doc.history[0].content, "# Doc");
    }

    #[test]
    fn test_record_snapshot_appends_and_caps() {
        let mut collection = DocumentCollection::default();
        let id = collection.add("Doc", None);

        // Same content as the initial snapshot: nothing recorded
        collection.record_snapshot(&id).unwrap();
        assert_eq!(collection.get(&id).unwrap().history.len(), 1);

        for i in 0..15 {
            collection.update_content(&id, &format!("v{}", i)).unwrap();
            collection.record_snapshot(&id).unwrap();
        }
        let history = &collection.get(&id).unwrap().history;
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.last().unwrap().content, "v14");
        assert_eq!(history.first().unwrap().content, "v5");
    }

    #[test]
    fn test_delete_current_moves_to_neighbour() {
        let mut collection = DocumentCollection::empty();
        let a = collection.add("a", None);
        let b = collection.add("b", None);
        let c = collection.add("c", None);

        collection.set_current(&b).unwrap();
        collection.delete(&b).unwrap();
        assert_eq!(collection.current_id(), c);

        collection.delete(&c).unwrap();
        assert_eq!(collection.current_id(), a);

        collection.delete(&a).unwrap();
        assert_eq!(collection.current_id(), "");
        assert!(collection.is_empty());
    }

    #[test]
    fn test_delete_other_keeps_current() {
        let mut collection = DocumentCollection::empty();
        let a = collection.add("a", None);
        let b = collection.add("b", None);
        collection.delete(&a).unwrap();
        assert_eq!(collection.current_id(), b);
    }

    #[test]
    fn test_set_parent_and_children() {
        let mut collection = DocumentCollection::empty();
        let root = collection.add("root", None);
        let child = collection.add("child", None);
        collection.set_parent(&child, Some(root.clone())).unwrap();

        let children: Vec<_> = collection.children_of(Some(&root)).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, child);
        assert_eq!(collection.children_of(None).count(), 1);

        assert!(collection.set_parent(&root, Some(root.clone())).is_err());
    }

    #[test]
    fn test_collapse_and_expand_all() {
        let mut collection = DocumentCollection::default();
        collection.add("x", None);
        collection.collapse_all();
        assert!(collection.iter().all(|p| p.collapsed));
        collection.expand_all();
        assert!(collection.iter().all(|p| !p.collapsed));
    }

    #[test]
    fn test_rehydrate_repairs_current() {
        let mut collection = DocumentCollection::default();
        let first = collection.iter().next().unwrap().id.clone();
        collection.current_post_id = "stale".to_string();
        collection.rehydrate();
        assert_eq!(collection.current_id(), first);
    }
}
