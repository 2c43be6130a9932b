//! Markdown Formatting Commands
//!
//! Formatting is computed as a single `TextEdit` from the text and selection,
//! then committed through the editing surface, so every command is exactly
//! one edit (and one change notification).
//!
//! # Usage
//! ```ignore
//! let mut buffer = TextBuffer::new("Hello world");
//! buffer.set_selection(0, 5);
//! FormatCommand::Bold.apply(&mut buffer);
//! assert_eq!(buffer.text(), "**Hello** world");
//! ```

use super::surface::EditingSurface;
use crate::string_utils::{char_index_to_byte_index, char_len};

/// Inserted when wrapping an empty selection.
pub const PLACEHOLDER: &str = "text";

// ─────────────────────────────────────────────────────────────────────────────
// Format Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Markdown formatting commands that can be applied to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Strikethrough (~~text~~)
    Strikethrough,
    /// Inline code (`code`)
    InlineCode,
    /// Link ([text](url))
    Link,
    /// Heading level 1-4
    Heading(u8),
    /// Blockquote
    Quote,
}

/// How a command changes the text.
enum Markup {
    Wrap(&'static str, &'static str),
    LinePrefix(&'static str),
}

impl FormatCommand {
    /// Parse a command name such as `bold`, `code`, `h2` or `quote`.
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "strikethrough" => Self::Strikethrough,
            "code" => Self::InlineCode,
            "link" => Self::Link,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "quote" => Self::Quote,
            _ => return None,
        };
        Some(command)
    }

    pub fn label(&self) -> String {
        match self {
            Self::Bold => "Bold".to_string(),
            Self::Italic => "Italic".to_string(),
            Self::Strikethrough => "Strikethrough".to_string(),
            Self::InlineCode => "Inline Code".to_string(),
            Self::Link => "Insert Link".to_string(),
            Self::Heading(n) => format!("Heading {}", n),
            Self::Quote => "Blockquote".to_string(),
        }
    }

    fn markup(&self) -> Markup {
        match self {
            Self::Bold => Markup::Wrap("**", "**"),
            Self::Italic => Markup::Wrap("*", "*"),
            Self::Strikethrough => Markup::Wrap("~~", "~~"),
            Self::InlineCode => Markup::Wrap("`", "`"),
            Self::Link => Markup::Wrap("[", "](url)"),
            Self::Heading(1) => Markup::LinePrefix("# "),
            Self::Heading(2) => Markup::LinePrefix("## "),
            Self::Heading(3) => Markup::LinePrefix("### "),
            // Deeper levels are clamped to 4
            Self::Heading(_) => Markup::LinePrefix("#### "),
            Self::Quote => Markup::LinePrefix("> "),
        }
    }

    /// Compute the edit for `text` with `selection` (character indices).
    pub fn edit(&self, text: &str, selection: (usize, usize)) -> TextEdit {
        let len = char_len(text);
        let from = selection.0.min(selection.1).min(len);
        let to = selection.0.max(selection.1).min(len);

        match self.markup() {
            Markup::Wrap(prefix, suffix) => wrap_edit(text, from, to, prefix, suffix),
            Markup::LinePrefix(prefix) => {
                let line_start = line_start(text, from);
                let cursor = from + char_len(prefix);
                TextEdit {
                    from: line_start,
                    to: line_start,
                    insert: prefix.to_string(),
                    selection: (cursor, cursor),
                }
            }
        }
    }

    /// Apply the command to a surface as one committed edit.
    pub fn apply(&self, surface: &mut dyn EditingSurface) {
        let edit = self.edit(&surface.text(), surface.selection());
        surface.replace_range(edit.from, edit.to, &edit.insert);
        surface.set_selection(edit.selection.0, edit.selection.1);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Edit
// ─────────────────────────────────────────────────────────────────────────────

/// One replacement plus the selection to restore afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub from: usize,
    pub to: usize,
    pub insert: String,
    pub selection: (usize, usize),
}

impl TextEdit {
    /// Apply to a plain string.
    pub fn apply_to(&self, text: &str) -> String {
        let start = char_index_to_byte_index(text, self.from);
        let end = char_index_to_byte_index(text, self.to);
        format!("{}{}{}", &text[..start], self.insert, &text[end..])
    }
}

fn wrap_edit(text: &str, from: usize, to: usize, prefix: &str, suffix: &str) -> TextEdit {
    let start = char_index_to_byte_index(text, from);
    let end = char_index_to_byte_index(text, to);
    let selected = &text[start..end];

    // Already wrapped: unwrap
    let wrapped_len = prefix.len() + suffix.len();
    if selected.len() > wrapped_len && selected.starts_with(prefix) && selected.ends_with(suffix) {
        let inner = &selected[prefix.len()..selected.len() - suffix.len()];
        return TextEdit {
            from,
            to,
            insert: inner.to_string(),
            selection: (from, from + char_len(inner)),
        };
    }

    let content = if selected.is_empty() { PLACEHOLDER } else { selected };
    let inner_start = from + char_len(prefix);
    TextEdit {
        from,
        to,
        insert: format!("{}{}{}", prefix, content, suffix),
        selection: (inner_start, inner_start + char_len(content)),
    }
}

/// Character index of the start of the line containing `index`.
fn line_start(text: &str, index: usize) -> usize {
    let byte = char_index_to_byte_index(text, index);
    text[..byte]
        .rfind('\n')
        .map(|nl| char_len(&text[..=nl]))
        .unwrap_or(0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::TextBuffer;
    use std::cell::Cell;
    use std::rc::Rc;

    fn run(command: FormatCommand, text: &str, selection: (usize, usize)) -> (String, (usize, usize)) {
        let mut buffer = TextBuffer::new(text);
        buffer.set_selection(selection.0, selection.1);
        command.apply(&mut buffer);
        (buffer.text(), buffer.selection())
    }

    #[test]
    fn test_wrap_selection() {
        assert_eq!(
            run(FormatCommand::Bold, "Hello world", (0, 5)),
            ("**Hello** world".to_string(), (2, 7))
        );
        assert_eq!(
            run(FormatCommand::Strikethrough, "a b", (2, 3)),
            ("a ~~b~~".to_string(), (4, 5))
        );
    }

    #[test]
    fn test_empty_selection_inserts_placeholder() {
        assert_eq!(
            run(FormatCommand::Italic, "x", (1, 1)),
            ("x*text*".to_string(), (2, 6))
        );
        assert_eq!(
            run(FormatCommand::Link, "", (0, 0)),
            ("[text](url)".to_string(), (1, 5))
        );
    }

    #[test]
    fn test_wrapped_selection_is_unwrapped() {
        assert_eq!(
            run(FormatCommand::InlineCode, "use `x` here", (4, 7)),
            ("use x here".to_string(), (4, 5))
        );
    }

    #[test]
    fn test_line_prefix() {
        assert_eq!(
            run(FormatCommand::Heading(2), "one\ntwo", (5, 6)),
            ("one\n## two".to_string(), (8, 8))
        );
        assert_eq!(
            run(FormatCommand::Quote, "quote me", (3, 3)),
            ("> quote me".to_string(), (5, 5))
        );
    }

    #[test]
    fn test_unicode_positions() {
        assert_eq!(
            run(FormatCommand::Bold, "日本語", (1, 2)),
            ("日**本**語".to_string(), (3, 4))
        );
    }

    #[test]
    fn test_one_notification_per_command() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let mut buffer = TextBuffer::new("Hello");
        buffer.on_change(Box::new(move |_| counter.set(counter.get() + 1)));
        buffer.set_selection(0, 5);
        FormatCommand::Bold.apply(&mut buffer);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(FormatCommand::from_name("h3"), Some(FormatCommand::Heading(3)));
        assert_eq!(FormatCommand::from_name("code"), Some(FormatCommand::InlineCode));
        assert_eq!(FormatCommand::from_name("h7"), None);
        assert_eq!(FormatCommand::Heading(2).label(), "Heading 2");
    }

    #[test]
    fn test_edit_apply_to() {
        let edit = FormatCommand::Bold.edit("ab", (0, 1));
        assert_eq!(edit.apply_to("ab"), "**a**b");
    }
}
