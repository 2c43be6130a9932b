//! Configuration module for mdpress
//!
//! This module handles presentation settings and the storage contract used
//! to persist settings, custom CSS and the document collection.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
