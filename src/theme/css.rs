//! Minimal CSS reading
//!
//! Enough CSS to load the built-in themes, user stylesheets, syntect code
//! themes and inline `style` attributes: plain rule sets and declarations.
//! At-rules (`@import`, `@media`, ...) are skipped, comments dropped and
//! `!important` ignored.

use super::{Declaration, StyleRule};

/// Parse a stylesheet into rules, in source order.
pub fn parse_stylesheet(css: &str) -> Vec<StyleRule> {
    let css = strip_comments(css);
    let mut rules = Vec::new();
    let mut rest = css.as_str();

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if rest.starts_with('@') {
            rest = skip_at_rule(rest);
            continue;
        }
        let Some(open) = rest.find('{') else {
            break;
        };
        let selector = normalize_selector(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').unwrap_or(after.len());
        let declarations = parse_declarations(&after[..close]);
        if !selector.is_empty() && !declarations.is_empty() {
            rules.push(StyleRule {
                selector,
                declarations,
            });
        }
        rest = after.get(close + 1..).unwrap_or("");
    }
    rules
}

/// Parse the body of a rule set or a `style` attribute.
pub fn parse_declarations(body: &str) -> Vec<Declaration> {
    body.split(';')
        .filter_map(|part| {
            let (property, value) = part.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = strip_important(value.trim());
            if property.is_empty() || value.is_empty() {
                None
            } else {
                Some(Declaration::new(property, value))
            }
        })
        .collect()
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    match lower.rfind("!important") {
        Some(pos) if lower[pos..].trim() == "!important" => value[..pos].trim_end(),
        _ => value,
    }
}

fn normalize_selector(selector: &str) -> String {
    selector
        .split(',')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Skip an at-rule: up to its `;`, or past its balanced block.
fn skip_at_rule(css: &str) -> &str {
    let semicolon = css.find(';');
    let brace = css.find('{');
    match (semicolon, brace) {
        (Some(semi), Some(open)) if semi < open => &css[semi + 1..],
        (Some(semi), None) => &css[semi + 1..],
        (_, Some(open)) => {
            let mut depth = 0usize;
            for (i, ch) in css[open..].char_indices() {
                match ch {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            return &css[open + i + 1..];
                        }
                    }
                    _ => {}
                }
            }
            ""
        }
        (None, None) => "",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rules_in_order() {
        let rules = parse_stylesheet("h1 { color: red; }\np,\n  li  em { margin: 0 ; font-size: 1em }");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selector, "h1");
        assert_eq!(rules[0].declarations, vec![Declaration::new("color", "red")]);
        assert_eq!(rules[1].selector, "p, li em");
        assert_eq!(rules[1].declarations.len(), 2);
        assert_eq!(rules[1].declarations[1].value, "1em");
    }

    #[test]
    fn test_comments_and_at_rules_are_skipped() {
        let css = r#"
            @import url("https://example.com/a.css");
            /* h2 { color: blue; } */
            @media (max-width: 600px) { p { color: green; } }
            h3 { color: #333 !important; }
        "#;
        let rules = parse_stylesheet(css);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector, "h3");
        assert_eq!(rules[0].declarations[0].value, "#333");
    }

    #[test]
    fn test_empty_and_broken_input() {
        assert!(parse_stylesheet("").is_empty());
        assert!(parse_stylesheet("   ").is_empty());
        assert!(parse_stylesheet("p { }").is_empty());
        let rules = parse_stylesheet("p { color: red");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].declarations[0].value, "red");
    }

    #[test]
    fn test_parse_declarations_inline_style() {
        let declarations = parse_declarations("Color: var(--md-primary-color); background:url(http://x/y.png);;bad");
        assert_eq!(
            declarations,
            vec![
                Declaration::new("color", "var(--md-primary-color)"),
                Declaration::new("background", "url(http://x/y.png)"),
            ]
        );
    }
}
