//! mdpress - markdown to paste-ready HTML
//!
//! Renders markdown into themed HTML, keeps a table of contents and reading
//! time alongside the output, and flattens the styling into inline attributes
//! for publishing editors that ignore stylesheets.
//!
//! # Modules
//!
//! - `markdown` - Markdown to raw HTML fragment
//! - `render` - Heading anchors, table of contents, reading time
//! - `theme` - Theme resolution and the installed presentation
//! - `compat` - Inline-style flattening for paste targets
//! - `pipeline` - Event-driven orchestration of the stages above
//! - `export` - Export formats and clipboard copy
//! - `editor` - Editing surface contract and formatting commands
//! - `document` - Document collection with content history
//! - `config` - Settings and persistence

pub mod compat;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod export;
pub mod markdown;
pub mod pipeline;
pub mod render;
pub mod string_utils;
pub mod theme;

pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineContext, PipelineEvent, PipelineState};
