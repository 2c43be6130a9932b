//! Clipboard Operations for Export
//!
//! This module copies export output to the system clipboard using the
//! arboard crate.

use super::options::CopyMode;
use crate::error::Result;
use crate::string_utils::text_content;
use arboard::Clipboard;
use log::info;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Payload
// ─────────────────────────────────────────────────────────────────────────────

/// What is placed on the clipboard for one copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    /// Rich HTML with a plain text fallback
    Html { html: String, plain: String },
    /// Plain text only
    Text(String),
}

impl ClipboardPayload {
    /// Build the payload for `mode` from that mode's export output.
    pub fn for_mode(mode: CopyMode, content: &str) -> Self {
        match mode {
            CopyMode::Txt => ClipboardPayload::Html {
                html: content.to_string(),
                plain: text_content(content),
            },
            CopyMode::Md | CopyMode::Html => ClipboardPayload::Text(content.to_string()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Place `payload` on the system clipboard.
///
/// # Example
///
/// ```ignore
/// let html = pipeline.export(ExportFormat::Inline)?;
/// copy_to_clipboard(&ClipboardPayload::for_mode(CopyMode::Txt, &html))?;
/// // User can now paste formatted content into the publishing editor
/// ```
pub fn copy_to_clipboard(payload: &ClipboardPayload) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    match payload {
        ClipboardPayload::Html { html, plain } => {
            clipboard.set_html(html.as_str(), Some(plain.as_str()))?;
            info!("Copied {} bytes of HTML to clipboard", html.len());
        }
        ClipboardPayload::Text(text) => {
            clipboard.set_text(text.as_str())?;
            info!("Copied {} bytes of text to clipboard", text.len());
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_mode_has_plain_fallback() {
        let payload = ClipboardPayload::for_mode(CopyMode::Txt, "<p>Hello <strong>world</strong></p>");
        assert_eq!(
            payload,
            ClipboardPayload::Html {
                html: "<p>Hello <strong>world</strong></p>".to_string(),
                plain: "Hello world".to_string(),
            }
        );
    }

    #[test]
    fn test_source_modes_copy_text() {
        assert_eq!(
            ClipboardPayload::for_mode(CopyMode::Html, "<p>x</p>"),
            ClipboardPayload::Text("<p>x</p>".to_string())
        );
        assert_eq!(
            ClipboardPayload::for_mode(CopyMode::Md, "# x"),
            ClipboardPayload::Text("# x".to_string())
        );
    }

    // Note: Actual clipboard tests require a display/clipboard context
    // which isn't typically available in CI environments.
}
