//! Export formats and copy modes

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Export Format
// ─────────────────────────────────────────────────────────────────────────────

/// Output produced by an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// The raw markdown source
    Markdown,
    /// The rendered fragment, styled by class names and variables
    #[default]
    Html,
    /// The rendered fragment with every color inlined
    Inline,
    /// A standalone HTML document with the stylesheet embedded
    Document,
}

impl ExportFormat {
    /// Get the display label for this format.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "Markdown",
            ExportFormat::Html => "HTML",
            ExportFormat::Inline => "Inlined HTML",
            ExportFormat::Document => "HTML Document",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html | ExportFormat::Inline | ExportFormat::Document => "html",
        }
    }

    /// Get all available export formats.
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Markdown,
            ExportFormat::Html,
            ExportFormat::Inline,
            ExportFormat::Document,
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Copy Mode
// ─────────────────────────────────────────────────────────────────────────────

/// What the clipboard receives on copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CopyMode {
    /// Rich inlined HTML, with the plain text as fallback
    #[default]
    Txt,
    /// The markdown source as text
    Md,
    /// The inlined HTML source as text
    Html,
}

impl CopyMode {
    pub fn label(&self) -> &'static str {
        match self {
            CopyMode::Txt => "Copy for publishing",
            CopyMode::Md => "Copy as Markdown",
            CopyMode::Html => "Copy HTML source",
        }
    }

    /// The export whose output is copied.
    pub fn format(&self) -> ExportFormat {
        match self {
            CopyMode::Txt | CopyMode::Html => ExportFormat::Inline,
            CopyMode::Md => ExportFormat::Markdown,
        }
    }

    pub fn all() -> &'static [CopyMode] {
        &[CopyMode::Txt, CopyMode::Md, CopyMode::Html]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_default() {
        assert_eq!(ExportFormat::default(), ExportFormat::Html);
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Markdown.extension(), "md");
        assert_eq!(ExportFormat::Inline.extension(), "html");
        assert_eq!(ExportFormat::Document.extension(), "html");
    }

    #[test]
    fn test_copy_mode_format() {
        assert_eq!(CopyMode::default(), CopyMode::Txt);
        assert_eq!(CopyMode::Txt.format(), ExportFormat::Inline);
        assert_eq!(CopyMode::Md.format(), ExportFormat::Markdown);
        assert_eq!(CopyMode::Html.format(), ExportFormat::Inline);
    }

    #[test]
    fn test_serialization_names() {
        assert_eq!(
            serde_json::to_string(&ExportFormat::Inline).unwrap(),
            "\"inline\""
        );
        let mode: CopyMode = serde_json::from_str("\"md\"").unwrap();
        assert_eq!(mode, CopyMode::Md);
    }
}
