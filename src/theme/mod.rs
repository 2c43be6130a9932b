//! Theme System for mdpress
//!
//! This module resolves a named theme plus the user's style variables into a
//! concrete `StyleDefinition`, and keeps the currently installed presentation.
//!
//! # Architecture
//!
//! A theme is a list of `StyleRule`s written against the rendered fragment.
//! Values refer to the style variables through CSS custom properties
//! (`var(--md-primary-color)` and friends), so changing a variable never
//! requires touching the rules.
//!
//! ```ignore
//! use mdpress::theme::{resolve, Presentation, ThemeVariables};
//!
//! let variables = ThemeVariables::from(&settings);
//! let definition = resolve("grace", &variables, "")?;
//!
//! let mut presentation = Presentation::new();
//! presentation.apply(definition);
//! presentation.update_code_theme("InspiredGitHub");
//! let css = presentation.stylesheet();
//! ```
//!
//! # Files
//!
//! - `builtin.rs` - The built-in themes as CSS
//! - `css.rs` - Minimal stylesheet and declaration parsing
//! - `resolver.rs` - Theme name + variables -> `StyleDefinition`
//! - `presentation.rs` - The installed theme and code theme slots

mod builtin;
pub mod css;
mod presentation;
mod resolver;

pub use builtin::THEME_NAMES;
pub use presentation::Presentation;
pub use resolver::resolve;

use crate::config::ThemeSettings;

/// Selector every stylesheet rule is scoped under.
pub const OUTPUT_SCOPE: &str = "#output";

/// Custom property holding the primary color.
pub const PRIMARY_COLOR_VAR: &str = "--md-primary-color";
/// Custom property holding the body font family.
pub const FONT_FAMILY_VAR: &str = "--md-font-family";
/// Custom property holding the body font size.
pub const FONT_SIZE_VAR: &str = "--md-font-size";

// ─────────────────────────────────────────────────────────────────────────────
// Rules
// ─────────────────────────────────────────────────────────────────────────────

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A rule set: a selector list and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Comma-separated selector list, relative to the output container
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            selector: selector.into(),
            declarations,
        }
    }

    /// The individual selectors of the list.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.selector
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Render as CSS with every selector prefixed by `scope`.
    pub fn to_css(&self, scope: &str) -> String {
        let selectors: Vec<String> = self
            .selectors()
            .map(|s| format!("{} {}", scope, s))
            .collect();
        let body: String = self
            .declarations
            .iter()
            .map(|d| format!("  {}: {};\n", d.property, d.value))
            .collect();
        format!("{} {{\n{}}}\n", selectors.join(", "), body)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Variables
// ─────────────────────────────────────────────────────────────────────────────

/// The user-adjustable inputs of a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeVariables {
    pub primary_color: String,
    pub font_family: String,
    pub font_size: String,
    pub use_indent: bool,
    pub use_justify: bool,
}

impl From<&ThemeSettings> for ThemeVariables {
    fn from(settings: &ThemeSettings) -> Self {
        Self {
            primary_color: settings.primary_color.clone(),
            font_family: settings.font_family.clone(),
            font_size: settings.font_size.clone(),
            use_indent: settings.use_indent,
            use_justify: settings.use_justify,
        }
    }
}

impl Default for ThemeVariables {
    fn default() -> Self {
        Self::from(&ThemeSettings::default())
    }
}

impl ThemeVariables {
    /// The custom properties the rules refer to.
    pub fn custom_properties(&self) -> Vec<Declaration> {
        vec![
            Declaration::new(PRIMARY_COLOR_VAR, &self.primary_color),
            Declaration::new(FONT_FAMILY_VAR, &self.font_family),
            Declaration::new(FONT_SIZE_VAR, &self.font_size),
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style Definition
// ─────────────────────────────────────────────────────────────────────────────

/// A resolved theme: its variables and the full ordered rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDefinition {
    pub theme_name: String,
    pub variables: ThemeVariables,
    /// Theme rules, then indent/justify rules, then custom CSS rules
    pub rules: Vec<StyleRule>,
}

impl StyleDefinition {
    /// Value of a custom property such as `--md-primary-color`.
    pub fn variable(&self, name: &str) -> Option<&str> {
        match name {
            PRIMARY_COLOR_VAR => Some(&self.variables.primary_color),
            FONT_FAMILY_VAR => Some(&self.variables.font_family),
            FONT_SIZE_VAR => Some(&self.variables.font_size),
            _ => None,
        }
    }

    /// The stylesheet, scoped under `#output`.
    pub fn to_css(&self) -> String {
        let mut css = format!("{} {{\n", OUTPUT_SCOPE);
        for property in self.variables.custom_properties() {
            css.push_str(&format!("  {}: {};\n", property.property, property.value));
        }
        css.push_str("}\n");
        for rule in &self.rules {
            css.push_str(&rule.to_css(OUTPUT_SCOPE));
        }
        css
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_to_css_scopes_every_selector() {
        let rule = StyleRule::new(
            "h1, .container p",
            vec![Declaration::new("color", "red")],
        );
        assert_eq!(
            rule.to_css("#output"),
            "#output h1, #output .container p {\n  color: red;\n}\n"
        );
    }

    #[test]
    fn test_variables_from_settings() {
        let mut settings = ThemeSettings::default();
        settings.primary_color = "#ff0000".to_string();
        settings.use_indent = true;
        let variables = ThemeVariables::from(&settings);
        assert_eq!(variables.primary_color, "#ff0000");
        assert!(variables.use_indent);
        assert!(!variables.use_justify);
    }

    #[test]
    fn test_definition_css_declares_variables() {
        let definition = StyleDefinition {
            theme_name: "default".to_string(),
            variables: ThemeVariables::default(),
            rules: vec![StyleRule::new(
                "strong",
                vec![Declaration::new("color", "var(--md-primary-color)")],
            )],
        };
        let css = definition.to_css();
        assert!(css.starts_with("#output {\n  --md-primary-color: #0F4C81;\n"));
        assert!(css.contains("#output strong {\n  color: var(--md-primary-color);\n}"));
        assert_eq!(definition.variable("--md-font-size"), Some("16px"));
        assert_eq!(definition.variable("--unknown"), None);
    }
}
