//! Post-processing stage of the pipeline
//!
//! This module turns a raw rendered fragment into the canonical render
//! output: addressed headings, the table of contents and reading time.

mod postprocess;
mod reading_time;
pub mod toc;

pub use postprocess::{address_headings, process, Processed, CONTAINER_CLASS};
pub use reading_time::{ReadingTime, WORDS_PER_MINUTE};
pub use toc::TitleEntry;

use serde::Serialize;

/// The canonical rendered output of one document.
///
/// Produced fresh on every render and replaced as a whole, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderResult {
    pub html: String,
    pub reading_time: ReadingTime,
}
