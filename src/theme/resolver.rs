//! Theme resolution

use super::builtin::{theme_rules, THEME_NAMES};
use super::css::parse_stylesheet;
use super::{Declaration, StyleDefinition, StyleRule, ThemeVariables};
use crate::error::{Error, Result};
use log::debug;

/// Resolve a theme name, variables and custom CSS into a `StyleDefinition`.
///
/// Rules are ordered: theme rules, then the indent/justify paragraph rules,
/// then the custom CSS, so later rules win ties.
///
/// # Errors
///
/// Returns `Error::Configuration` if `theme_name` is not a built-in theme.
pub fn resolve(
    theme_name: &str,
    variables: &ThemeVariables,
    custom_css: &str,
) -> Result<StyleDefinition> {
    let mut rules = theme_rules(theme_name).ok_or_else(|| {
        Error::configuration(format!(
            "unknown theme '{}' (available: {})",
            theme_name,
            THEME_NAMES.join(", ")
        ))
    })?;

    if variables.use_indent {
        rules.push(StyleRule::new(
            "p",
            vec![Declaration::new("text-indent", "2em")],
        ));
    }
    if variables.use_justify {
        rules.push(StyleRule::new(
            "p",
            vec![Declaration::new("text-align", "justify")],
        ));
    }

    let custom = parse_stylesheet(custom_css);
    debug!(
        "Resolved theme '{}' with {} rules ({} custom)",
        theme_name,
        rules.len() + custom.len(),
        custom.len()
    );
    rules.extend(custom);

    Ok(StyleDefinition {
        theme_name: theme_name.to_string(),
        variables: variables.clone(),
        rules,
    })
}
