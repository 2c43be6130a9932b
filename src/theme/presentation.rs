//! The installed presentation
//!
//! Holds what is currently applied to the output surface in two independent
//! slots: the resolved theme (rules plus variables) and the code highlight
//! theme. Installing into a slot replaces its previous content, so only the
//! latest call is ever reflected.
//!
//! # Usage
//!
//! ```ignore
//! let mut presentation = Presentation::new();
//! presentation.apply(resolve("default", &variables, "")?);
//! presentation.update_code_theme("base16-ocean.dark");
//! let css = presentation.stylesheet();
//! ```

use super::css::parse_stylesheet;
use super::StyleDefinition;
use crate::markdown::get_highlighter;
use log::{debug, info};

/// The installed theme and code theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    /// Theme + variables slot
    style: Option<StyleDefinition>,
    /// Code highlight slot: a bundled code theme name or a stylesheet URL
    code_theme: Option<String>,
}

impl Presentation {
    /// Create an empty presentation with nothing installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a resolved theme, replacing the previous one.
    ///
    /// The code theme slot is left untouched.
    pub fn apply(&mut self, definition: StyleDefinition) {
        if self.theme_name() != Some(definition.theme_name.as_str()) {
            info!("Theme changed to '{}'", definition.theme_name);
        }
        debug!(
            "Applied theme '{}' ({} rules)",
            definition.theme_name,
            definition.rules.len()
        );
        self.style = Some(definition);
    }

    /// Point the code highlight slot at a new reference.
    ///
    /// Nothing else changes; the theme slot is left untouched.
    pub fn update_code_theme(&mut self, reference: &str) {
        debug!("Code theme changed to '{}'", reference);
        self.code_theme = Some(reference.to_string());
    }

    /// The installed theme, if any.
    pub fn style(&self) -> Option<&StyleDefinition> {
        self.style.as_ref()
    }

    pub fn theme_name(&self) -> Option<&str> {
        self.style.as_ref().map(|s| s.theme_name.as_str())
    }

    /// The installed code theme reference, if any.
    pub fn code_theme(&self) -> Option<&str> {
        self.code_theme.as_deref()
    }

    /// Whether the code theme reference names a bundled code theme.
    pub fn has_bundled_code_theme(&self) -> bool {
        self.code_theme
            .as_deref()
            .is_some_and(|name| get_highlighter().has_theme(name))
    }

    /// CSS of the code theme slot.
    ///
    /// Bundled themes are generated; any other reference is imported by URL.
    pub fn code_theme_css(&self) -> String {
        match self.code_theme.as_deref() {
            None | Some("") => String::new(),
            Some(reference) => get_highlighter()
                .theme_css(reference)
                .unwrap_or_else(|| format!("@import url(\"{}\");\n", reference)),
        }
    }

    /// The complete stylesheet for the output surface.
    pub fn stylesheet(&self) -> String {
        let code = self.code_theme_css();
        let theme = self.style.as_ref().map(|s| s.to_css()).unwrap_or_default();
        // @import must precede every other rule
        if code.starts_with("@import") {
            format!("{}{}", code, theme)
        } else {
            format!("{}{}", theme, code)
        }
    }

    /// The installed theme extended with the bundled code theme's rules.
    ///
    /// This is what the compatibility transform cascades against, so token
    /// colors inside code blocks are inlined as well.
    pub fn cascade_definition(&self) -> Option<StyleDefinition> {
        let mut definition = self.style.clone()?;
        if self.has_bundled_code_theme() {
            definition
                .rules
                .extend(parse_stylesheet(&self.code_theme_css()));
        }
        Some(definition)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
