//! Document model for mdpress
//!
//! A `Document` is one markdown post with its append-only history of content
//! snapshots. Documents live in a `DocumentCollection`, which always tracks a
//! single current document.

mod collection;

pub use collection::{DocumentCollection, MAX_HISTORY};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A snapshot of a document's content at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

/// A markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Oldest first; entries are never edited once recorded
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Whether the document's children are folded in a document tree
    #[serde(default)]
    pub collapsed: bool,
}

impl Document {
    /// Create a document with a fresh id and an initial history snapshot.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        let content = content.into();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            history: vec![HistoryEntry {
                timestamp: now,
                content: content.clone(),
            }],
            content,
            created_at: now,
            updated_at: now,
            parent_id: None,
            collapsed: false,
        }
    }

    /// Builder: attach to a parent document.
    pub fn with_parent(mut self, parent_id: Option<String>) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// The most recent history snapshot, if any.
    pub fn latest_snapshot(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_initial_snapshot() {
        let doc = Document::new("Notes", "# Notes");
        assert_eq!(doc.history.len(), 1);
        assert_eq!(doc.latest_snapshot().unwrap().content, "# Notes");
        assert_eq!(doc.created_at, doc.updated_at);
        assert!(doc.parent_id.is_none());
    }

    #[test]
    fn test_document_ids_are_unique() {
        let a = Document::new("a", "");
        let b = Document::new("b", "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_document_serialization_skips_missing_parent() {
        let doc = Document::new("t", "c");
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("parent_id"));

        let child = Document::new("child", "c").with_parent(Some(doc.id.clone()));
        let json = serde_json::to_string(&child).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, child);
    }
}
