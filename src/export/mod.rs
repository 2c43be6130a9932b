//! Document Export Module for mdpress
//!
//! This module provides the export formats produced by the pipeline and the
//! clipboard copy used to paste into a publishing editor.
//!
//! # Supported Export Formats
//!
//! - **Markdown**: The raw source text
//! - **HTML**: The rendered fragment, before flattening
//! - **Inline**: The rendered fragment with every color inlined
//! - **Document**: Complete HTML document with the stylesheet embedded
//!
//! # Architecture
//!
//! - `options.rs` - Export formats and copy modes
//! - `html.rs` - HTML document generation
//! - `clipboard.rs` - Platform clipboard operations

pub mod clipboard;
pub mod html;
pub mod options;

pub use clipboard::{copy_to_clipboard, ClipboardPayload};
pub use html::{generate_html_document, write_export};
pub use options::{CopyMode, ExportFormat};
