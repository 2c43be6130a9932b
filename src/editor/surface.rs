//! The editing surface contract
//!
//! The pipeline never owns the text widget. It reads and edits the document
//! through `EditingSurface`, with positions counted in characters.

use crate::string_utils::{char_index_to_byte_index, char_len};
use log::debug;

/// Called with the full text after each committed edit.
pub type ChangeListener = Box<dyn FnMut(&str)>;

/// Minimal contract of a text editing widget.
pub trait EditingSurface {
    /// The whole document text.
    fn text(&self) -> String;

    /// Replace the characters in `from..to` with `text`.
    ///
    /// Commits one edit and notifies the change listener once.
    fn replace_range(&mut self, from: usize, to: usize, text: &str);

    /// Current selection as `(from, to)`; equal when it is a cursor.
    fn selection(&self) -> (usize, usize);

    fn set_selection(&mut self, from: usize, to: usize);

    /// Register the listener for committed edits, replacing any previous one.
    fn on_change(&mut self, listener: ChangeListener);
}

// ─────────────────────────────────────────────────────────────────────────────
// TextBuffer
// ─────────────────────────────────────────────────────────────────────────────

/// An in-memory editing surface.
#[derive(Default)]
pub struct TextBuffer {
    text: String,
    selection: (usize, usize),
    listener: Option<ChangeListener>,
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("text", &self.text)
            .field("selection", &self.selection)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl TextBuffer {
    /// Create a buffer with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = char_len(&text);
        Self {
            text,
            selection: (end, end),
            listener: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Currently selected text.
    pub fn selected_text(&self) -> &str {
        let (from, to) = self.selection;
        let start = char_index_to_byte_index(&self.text, from);
        let end = char_index_to_byte_index(&self.text, to);
        &self.text[start..end]
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(char_len(&self.text))
    }
}

impl EditingSurface for TextBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn replace_range(&mut self, from: usize, to: usize, text: &str) {
        let (from, to) = (self.clamp(from.min(to)), self.clamp(from.max(to)));
        let start = char_index_to_byte_index(&self.text, from);
        let end = char_index_to_byte_index(&self.text, to);
        self.text.replace_range(start..end, text);

        let cursor = from + char_len(text);
        self.selection = (cursor, cursor);
        debug!("Replaced {}..{} with {} chars", from, to, char_len(text));

        if let Some(listener) = self.listener.as_mut() {
            listener(&self.text);
        }
    }

    fn selection(&self) -> (usize, usize) {
        self.selection
    }

    fn set_selection(&mut self, from: usize, to: usize) {
        let (from, to) = (self.clamp(from), self.clamp(to));
        self.selection = (from.min(to), from.max(to));
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listener = Some(listener);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_new_buffer_cursor_at_end() {
        let buffer = TextBuffer::new("héllo");
        assert_eq!(buffer.selection(), (5, 5));
        assert_eq!(buffer.selected_text(), "");
    }

    #[test]
    fn test_replace_range_uses_char_indices() {
        let mut buffer = TextBuffer::new("日本語 text");
        buffer.replace_range(0, 3, "中文");
        assert_eq!(buffer.as_str(), "中文 text");
        assert_eq!(buffer.selection(), (2, 2));
    }

    #[test]
    fn test_replace_range_clamps_and_orders() {
        let mut buffer = TextBuffer::new("abc");
        buffer.replace_range(10, 1, "X");
        assert_eq!(buffer.text(), "aX");
    }

    #[test]
    fn test_selection() {
        let mut buffer = TextBuffer::new("hello world");
        buffer.set_selection(11, 6);
        assert_eq!(buffer.selection(), (6, 11));
        assert_eq!(buffer.selected_text(), "world");
        buffer.set_selection(0, 100);
        assert_eq!(buffer.selection(), (0, 11));
    }

    #[test]
    fn test_listener_fires_once_per_edit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut buffer = TextBuffer::new("a");
        buffer.on_change(Box::new(move |text| sink.borrow_mut().push(text.to_string())));

        buffer.replace_range(1, 1, "b");
        buffer.set_selection(0, 0);
        buffer.replace_range(0, 0, "c");

        assert_eq!(*seen.borrow(), vec!["ab".to_string(), "cab".to_string()]);
    }
}
