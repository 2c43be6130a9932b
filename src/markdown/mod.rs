//! Markdown rendering module
//!
//! This module turns markdown text into an HTML fragment using the comrak
//! library, a CommonMark + GFM compatible parser, with code blocks
//! highlighted by syntect.
//!
//! # Features
//! - GitHub Flavored Markdown (tables, strikethrough, autolinks, task lists,
//!   footnotes)
//! - Headings tagged for table-of-contents addressing
//! - Code blocks with class-based highlighting, an optional window bar and
//!   line numbers
//! - Image figures with configurable captions
//! - External links collected as numbered citations
//!
//! # Example
//! ```ignore
//! use mdpress::config::RenderOptions;
//! use mdpress::markdown::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new(RenderOptions::default());
//! let fragment = renderer.render("# Hello\n\nWorld");
//! assert!(fragment.html.contains("data-heading"));
//! ```

pub mod highlight;
mod renderer;

pub use highlight::{get_highlighter, CodeHighlighter};
pub use renderer::{render, Citation, MarkdownRenderer, RawFragment};
