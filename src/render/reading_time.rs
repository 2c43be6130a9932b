//! Reading-time statistics
//!
//! Counts are always taken from the raw markdown source, never from the
//! rendered HTML, so they do not change when the theme or structural render
//! options change. A word is a whitespace-separated run holding at least one
//! letter or digit; bare markup such as `#`, `-`, `>` or a code fence is not
//! read aloud and is not counted.

use serde::Serialize;

/// Reading speed used to turn a word count into minutes.
pub const WORDS_PER_MINUTE: usize = 200;

// ─────────────────────────────────────────────────────────────────────────────
// ReadingTime
// ─────────────────────────────────────────────────────────────────────────────

/// Size and estimated reading time of a document.
///
/// # Example
///
/// ```ignore
/// let time = ReadingTime::from_text("Hello, World!");
/// assert_eq!(time.words, 2);
/// assert_eq!(time.minutes, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadingTime {
    /// Number of characters, whitespace included
    pub characters: usize,
    /// Number of words (whitespace-separated runs with a letter or digit)
    pub words: usize,
    /// Minutes at `WORDS_PER_MINUTE`, rounded up
    pub minutes: usize,
}

impl ReadingTime {
    /// Calculate reading time from raw text in a single pass.
    pub fn from_text(text: &str) -> Self {
        let mut characters = 0;
        let mut words = 0;
        // Whether the current run already counted as a word
        let mut counted = false;

        for ch in text.chars() {
            characters += 1;
            if ch.is_whitespace() {
                counted = false;
            } else if !counted && ch.is_alphanumeric() {
                counted = true;
                words += 1;
            }
        }

        Self {
            characters,
            words,
            minutes: words.div_ceil(WORDS_PER_MINUTE),
        }
    }

    /// Format for display, e.g. "350 words, about 2 min read".
    pub fn format_compact(&self) -> String {
        format!("{} words, about {} min read", self.words, self.minutes)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
