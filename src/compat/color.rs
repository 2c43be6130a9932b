//! CSS color values
//!
//! Colors are normalized to the form a browser reports as a computed style:
//! `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` otherwise.

/// Named colors understood by the cascade.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("fuchsia", (255, 0, 255)),
    ("magenta", (255, 0, 255)),
    ("cyan", (0, 255, 255)),
    ("aqua", (0, 255, 255)),
    ("teal", (0, 128, 128)),
    ("navy", (0, 0, 128)),
    ("maroon", (128, 0, 0)),
    ("olive", (128, 128, 0)),
    ("silver", (192, 192, 192)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("darkgray", (169, 169, 169)),
    ("darkgrey", (169, 169, 169)),
    ("lightgray", (211, 211, 211)),
    ("lightgrey", (211, 211, 211)),
    ("whitesmoke", (245, 245, 245)),
    ("hotpink", (255, 105, 180)),
    ("pink", (255, 192, 203)),
    ("brown", (165, 42, 42)),
    ("gold", (255, 215, 0)),
    ("indigo", (75, 0, 130)),
    ("crimson", (220, 20, 60)),
    ("tomato", (255, 99, 71)),
    ("coral", (255, 127, 80)),
    ("skyblue", (135, 206, 235)),
    ("steelblue", (70, 130, 180)),
    ("rebeccapurple", (102, 51, 153)),
];

/// Normalize a color value, or `None` if it is not a color.
///
/// Keywords such as `inherit`, `none` or `currentColor` are not colors.
pub fn normalize_color(value: &str) -> Option<String> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();

    if lower == "transparent" {
        return Some(format_rgba(0, 0, 0, 0.0));
    }
    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex).map(|(r, g, b, a)| format_rgba(r, g, b, a));
    }
    if lower.starts_with("rgb(") || lower.starts_with("rgba(") {
        return parse_rgb_function(&lower).map(|(r, g, b, a)| format_rgba(r, g, b, a));
    }
    if lower.starts_with("hsl(") || lower.starts_with("hsla(") {
        // Kept as written; only the alpha matters for transparency checks
        return Some(lower);
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, (r, g, b))| format_rgba(*r, *g, *b, 1.0))
}

/// The color part of a `background` shorthand, if it has one.
///
/// Image and gradient backgrounds have no usable color.
pub fn background_shorthand_color(value: &str) -> Option<String> {
    let lower = value.to_ascii_lowercase();
    if lower.contains("url(") || lower.contains("gradient(") {
        return None;
    }
    split_top_level(value)
        .into_iter()
        .find_map(|token| normalize_color(&token))
}

/// Whether a color is fully transparent.
pub fn is_transparent(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    if lower == "transparent" {
        return true;
    }
    let alpha = if let Some(hex) = lower.strip_prefix('#') {
        parse_hex(hex).map(|(_, _, _, a)| a)
    } else if lower.starts_with("rgb") {
        parse_rgb_function(&lower).map(|(_, _, _, a)| a)
    } else if lower.starts_with("hsl") {
        function_arguments(&lower)
            .and_then(|args| args.get(3).and_then(|a| parse_alpha(a)))
    } else {
        None
    };
    alpha.is_some_and(|a| a <= 0.0)
}

fn format_rgba(r: u8, g: u8, b: u8, a: f32) -> String {
    if a >= 1.0 {
        format!("rgb({}, {}, {})", r, g, b)
    } else {
        let a = (a * 1000.0).round() / 1000.0;
        format!("rgba({}, {}, {}, {})", r, g, b, a)
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8, f32)> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some((digit(0)?, digit(1)?, digit(2)?, 1.0)),
        4 => Some((digit(0)?, digit(1)?, digit(2)?, f32::from(digit(3)?) / 255.0)),
        6 => Some((pair(0)?, pair(2)?, pair(4)?, 1.0)),
        8 => Some((pair(0)?, pair(2)?, pair(4)?, f32::from(pair(6)?) / 255.0)),
        _ => None,
    }
}

fn parse_rgb_function(value: &str) -> Option<(u8, u8, u8, f32)> {
    let args = function_arguments(value)?;
    if args.len() < 3 {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let n = match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? * 2.55,
            None => s.parse::<f32>().ok()?,
        };
        Some(n.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = match args.get(3) {
        Some(a) => parse_alpha(a)?,
        None => 1.0,
    };
    Some((channel(&args[0])?, channel(&args[1])?, channel(&args[2])?, alpha))
}

fn parse_alpha(value: &str) -> Option<f32> {
    let a = match value.strip_suffix('%') {
        Some(pct) => pct.parse::<f32>().ok()? / 100.0,
        None => value.parse::<f32>().ok()?,
    };
    Some(a.clamp(0.0, 1.0))
}

/// Arguments of `name(a, b, c)` or `name(a b c / d)`.
fn function_arguments(value: &str) -> Option<Vec<String>> {
    let open = value.find('(')?;
    let close = value.rfind(')')?;
    let inner = value.get(open + 1..close)?;
    Some(
        inner
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Split on whitespace that is not inside parentheses.
fn split_top_level(value: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in value.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_color("#0F4C81").as_deref(), Some("rgb(15, 76, 129)"));
        assert_eq!(normalize_color("#fff").as_deref(), Some("rgb(255, 255, 255)"));
        assert_eq!(
            normalize_color("#00000080").as_deref(),
            Some("rgba(0, 0, 0, 0.502)")
        );
        assert_eq!(normalize_color("#zzz"), None);
    }

    #[test]
    fn test_normalize_functions_and_names() {
        assert_eq!(normalize_color("rgb(255,0,0)").as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(
            normalize_color("rgba(0, 0, 0, 0.5)").as_deref(),
            Some("rgba(0, 0, 0, 0.5)")
        );
        assert_eq!(normalize_color("rgba(1, 2, 3, 1)").as_deref(), Some("rgb(1, 2, 3)"));
        assert_eq!(normalize_color("rgb(0 0 0 / 50%)").as_deref(), Some("rgba(0, 0, 0, 0.5)"));
        assert_eq!(normalize_color("White").as_deref(), Some("rgb(255, 255, 255)"));
        assert_eq!(normalize_color("inherit"), None);
        assert_eq!(normalize_color("none"), None);
    }

    #[test]
    fn test_background_shorthand() {
        assert_eq!(
            background_shorthand_color("#f7f7f7").as_deref(),
            Some("rgb(247, 247, 247)")
        );
        assert_eq!(
            background_shorthand_color("rgba(0, 0, 0, 0.05) no-repeat").as_deref(),
            Some("rgba(0, 0, 0, 0.05)")
        );
        assert_eq!(background_shorthand_color("none"), None);
        assert_eq!(
            background_shorthand_color("linear-gradient(to right, red, blue)"),
            None
        );
    }

    #[test]
    fn test_is_transparent() {
        assert!(is_transparent("transparent"));
        assert!(is_transparent("rgba(0, 0, 0, 0)"));
        assert!(is_transparent("#ffffff00"));
        assert!(is_transparent("hsla(0, 0%, 0%, 0)"));
        assert!(!is_transparent("rgb(255, 0, 0)"));
        assert!(!is_transparent("rgba(0, 0, 0, 0.5)"));
        assert!(!is_transparent("red"));
    }
}
