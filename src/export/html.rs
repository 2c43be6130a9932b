//! HTML Export Generation
//!
//! This module wraps a rendered fragment into a complete HTML document with
//! the installed stylesheet embedded, for standalone viewing.

use crate::config::PreviewWidth;
use crate::error::{Error, Result};
use crate::string_utils::escape_html;
use log::info;
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete HTML document around a rendered fragment.
///
/// # Arguments
///
/// * `body` - The rendered fragment
/// * `title` - Optional document title
/// * `stylesheet` - The installed stylesheet (scoped under `#output`)
/// * `width` - Preview width class of the output container
///
/// # Returns
///
/// A complete HTML document as a string.
pub fn generate_html_document(
    body: &str,
    title: Option<&str>,
    stylesheet: &str,
    width: PreviewWidth,
) -> String {
    let doc_title = title.unwrap_or("Exported Document");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="mdpress">
    <title>{title}</title>
    <style>
{stylesheet}
{base_css}
    </style>
</head>
<body>
    <div id="output" class="{width}">
{body}
    </div>
</body>
</html>"#,
        title = escape_html(doc_title),
        stylesheet = stylesheet,
        base_css = BASE_CSS,
        width = width.css_class(),
        body = body,
    )
}

/// Write exported text to a file.
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Exported {} bytes to {}", contents.len(), path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS
// ─────────────────────────────────────────────────────────────────────────────

/// Page layout around the output container.
///
/// Comes after the stylesheet so that `@import` stays first.
const BASE_CSS: &str = r#"
body {
    margin: 0;
    padding: 0;
    background: #fff;
}

#output {
    margin: 0 auto;
    padding: 20px;
    box-sizing: border-box;
}

.preview-mobile {
    max-width: 375px;
}

.preview-desktop {
    max-width: 740px;
}
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
