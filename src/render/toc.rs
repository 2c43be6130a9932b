//! Table of contents entries
//!
//! Entries are produced by the post-processor while it addresses headings,
//! so their ids always match the `id` attributes in the rendered HTML.

use serde::Serialize;

// ─────────────────────────────────────────────────────────────────────────────
// TitleEntry
// ─────────────────────────────────────────────────────────────────────────────

/// One heading of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleEntry {
    /// The heading's `id` attribute; sequential, starting at "0"
    pub anchor_id: String,
    /// Flattened text content with entities decoded
    pub text: String,
    /// Heading level (1-6 for H1-H6)
    pub level: u8,
}

impl TitleEntry {
    pub fn new(anchor_id: impl Into<String>, text: impl Into<String>, level: u8) -> Self {
        Self {
            anchor_id: anchor_id.into(),
            text: text.into(),
            level,
        }
    }

    /// In-page link target, e.g. `#3`.
    pub fn href(&self) -> String {
        format!("#{}", self.anchor_id)
    }

    /// Get the indentation level (0 for H1, 1 for H2, etc.)
    pub fn indent_level(&self) -> usize {
        (self.level.saturating_sub(1)) as usize
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Summaries
// ─────────────────────────────────────────────────────────────────────────────

/// Get the number of headings at each level.
pub fn level_counts(entries: &[TitleEntry]) -> [usize; 6] {
    let mut counts = [0usize; 6];
    for entry in entries {
        if (1..=6).contains(&entry.level) {
            counts[(entry.level - 1) as usize] += 1;
        }
    }
    counts
}

/// Get a summary string like "3 H1, 5 H2, 2 H3"
pub fn summary(entries: &[TitleEntry]) -> String {
    let parts: Vec<String> = level_counts(entries)
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(i, count)| format!("{} H{}", count, i + 1))
        .collect();
    if parts.is_empty() {
        "No headings".to_string()
    } else {
        parts.join(", ")
    }
}

/// Render the entries as an indented plain-text outline.
pub fn to_outline(entries: &[TitleEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}- {}\n", "  ".repeat(entry.indent_level()), entry.text))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
