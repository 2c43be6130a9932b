//! Editor module for mdpress
//!
//! This module defines the contract through which the text widget is driven
//! and the markdown formatting commands applied through it.

mod format;
mod surface;

pub use format::{FormatCommand, TextEdit, PLACEHOLDER};
pub use surface::{ChangeListener, EditingSurface, TextBuffer};
