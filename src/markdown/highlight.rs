//! Code block highlighting
//!
//! This module integrates syntect for code block highlighting in rendered
//! output. Highlighting is class-based (`hljs-` prefixed classes), so the
//! colors come from a separate code theme stylesheet that can be swapped
//! without re-rendering.
//!
//! # Features
//! - Loads and caches syntect SyntaxSet and ThemeSet once per process
//! - Resolves fenced-code language identifiers through common aliases
//! - Produces whitespace-safe markup (`&nbsp;`, `<br/>`) for hosts that
//!   collapse whitespace
//! - Generates the stylesheet for any bundled code theme

use crate::string_utils::escape_html;
use log::{debug, warn};
use std::sync::OnceLock;
use syntect::highlighting::{Color, ThemeSet};
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Class prefix of every highlighted token.
pub const CLASS_PREFIX: &str = "hljs-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
    prefix: CLASS_PREFIX,
};

/// macOS-style window bar shown above code blocks.
const MAC_SIGN: &str = concat!(
    r#"<span class="mac-sign" style="padding: 10px 14px 0;">"#,
    r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" x="0px" y="0px" width="45px" height="13px" viewBox="0 0 450 130">"#,
    r#"<ellipse cx="50" cy="65" rx="50" ry="52" stroke="rgb(220,60,54)" stroke-width="2" fill="rgb(237,108,96)"/>"#,
    r#"<ellipse cx="225" cy="65" rx="50" ry="52" stroke="rgb(218,151,33)" stroke-width="2" fill="rgb(247,193,81)"/>"#,
    r#"<ellipse cx="400" cy="65" rx="50" ry="52" stroke="rgb(27,161,37)" stroke-width="2" fill="rgb(100,200,86)"/>"#,
    r#"</svg></span>"#
);

// ─────────────────────────────────────────────────────────────────────────────
// Code Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Syntax highlighter that caches syntect sets for performance.
///
/// Loading the sets is expensive; use `get_highlighter` to share one
/// instance.
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeHighlighter {
    /// Create a highlighter with the syntaxes and themes bundled with syntect.
    pub fn new() -> Self {
        debug!("Loading syntect syntax and theme sets");
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        debug!(
            "Loaded {} syntaxes and {} themes",
            syntax_set.syntaxes().len(),
            theme_set.themes.len()
        );
        Self {
            syntax_set,
            theme_set,
        }
    }

    /// Names of the bundled code themes, sorted.
    pub fn available_themes(&self) -> Vec<&str> {
        self.theme_set.themes.keys().map(|s| s.as_str()).collect()
    }

    /// Whether `name` is a bundled code theme.
    pub fn has_theme(&self, name: &str) -> bool {
        self.theme_set.themes.contains_key(name)
    }

    /// Stylesheet for a bundled code theme, or `None` if no such theme exists.
    ///
    /// Besides the token classes, the block background and default text
    /// color are set on `.code__pre`.
    pub fn theme_css(&self, name: &str) -> Option<String> {
        let theme = self.theme_set.themes.get(name)?;
        let tokens = match css_for_theme_with_class_style(theme, CLASS_STYLE) {
            Ok(css) => css,
            Err(e) => {
                warn!("Failed to generate CSS for code theme '{}': {}", name, e);
                return None;
            }
        };

        let mut block = String::new();
        if let Some(background) = theme.settings.background {
            block.push_str(&format!("background: {}; ", css_color(background)));
        }
        if let Some(foreground) = theme.settings.foreground {
            block.push_str(&format!("color: {}; ", css_color(foreground)));
        }
        Some(format!(".code__pre {{ {}}}\n{}", block, tokens))
    }

    /// Highlight `code` as `language` into inline HTML.
    ///
    /// Unknown languages are escaped without highlighting. The result has
    /// whitespace replaced by `&nbsp;` and newlines by `<br/>`.
    pub fn highlight(&self, code: &str, language: &str) -> String {
        let code = code.strip_suffix('\n').unwrap_or(code);
        let html = match self.find_syntax_for_language(language) {
            Some(syntax) => self.classed_html(code, syntax),
            None => {
                if !language.is_empty() {
                    debug!("No syntax found for language: {}", language);
                }
                escape_html(code)
            }
        };
        preserve_whitespace(&html)
    }

    fn classed_html(&self, code: &str, syntax: &SyntaxReference) -> String {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                warn!("Failed to highlight code block: {}", e);
                return escape_html(code);
            }
        }
        generator.finalize()
    }

    /// Find syntax definition for a language identifier.
    ///
    /// Tries multiple strategies:
    /// 1. By extension, after mapping common aliases (e.g., "rust" -> "rs")
    /// 2. By name (e.g., "Rust" -> Rust)
    /// 3. By case-insensitive name
    fn find_syntax_for_language(&self, language: &str) -> Option<&SyntaxReference> {
        if language.is_empty() {
            return None;
        }

        let lang_lower = language.to_lowercase();

        let extension = match lang_lower.as_str() {
            "rust" | "rs" => "rs",
            "python" | "py" => "py",
            "javascript" | "js" => "js",
            "typescript" | "ts" => "ts",
            "c" => "c",
            "cpp" | "c++" | "cxx" => "cpp",
            "csharp" | "c#" | "cs" => "cs",
            "java" => "java",
            "go" | "golang" => "go",
            "ruby" | "rb" => "rb",
            "php" => "php",
            "scala" => "scala",
            "html" | "htm" => "html",
            "css" => "css",
            "json" => "json",
            "yaml" | "yml" => "yaml",
            "xml" => "xml",
            "markdown" | "md" => "md",
            "sql" => "sql",
            "shell" | "sh" | "bash" | "zsh" => "sh",
            "makefile" | "make" => "Makefile",
            "lua" => "lua",
            "perl" | "pl" => "pl",
            "r" => "r",
            "haskell" | "hs" => "hs",
            "erlang" | "erl" => "erl",
            "clojure" | "clj" => "clj",
            "diff" | "patch" => "diff",
            other => other,
        };

        if let Some(syntax) = self.syntax_set.find_syntax_by_extension(extension) {
            return Some(syntax);
        }

        if let Some(syntax) = self.syntax_set.find_syntax_by_name(language) {
            return Some(syntax);
        }

        self.syntax_set
            .syntaxes()
            .iter()
            .find(|syntax| syntax.name.to_lowercase() == lang_lower)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Code Block Markup
// ─────────────────────────────────────────────────────────────────────────────

/// Presentation switches for one code block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeBlockStyle {
    pub mac_sign: bool,
    pub line_numbers: bool,
}

/// Render a complete `<pre>` block for a fenced or indented code block.
pub fn render_code_block(code: &str, language: &str, style: CodeBlockStyle) -> String {
    let highlighted = get_highlighter().highlight(code, language);
    let language_class = if language.is_empty() {
        "plaintext".to_string()
    } else {
        escape_html(language)
    };

    let mut html = String::with_capacity(highlighted.len() + 512);
    html.push_str(r#"<pre class="code__pre hljs">"#);
    if style.mac_sign {
        html.push_str(MAC_SIGN);
    }
    if style.line_numbers {
        html.push_str(&line_number_gutter(code));
    }
    html.push_str(&format!(
        r#"<code class="language-{}">{}</code></pre>"#,
        language_class, highlighted
    ));
    html.push('\n');
    html
}

fn line_number_gutter(code: &str) -> String {
    let lines = code.strip_suffix('\n').unwrap_or(code).split('\n').count();
    let numbers: Vec<String> = (1..=lines).map(|n| n.to_string()).collect();
    format!(
        r#"<span class="line-numbers">{}</span>"#,
        numbers.join("<br/>")
    )
}

/// Replace whitespace in text (never inside tags) with `&nbsp;` and newlines
/// with `<br/>`.
fn preserve_whitespace(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 4);
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(ch);
            }
            '>' => {
                in_tag = false;
                out.push(ch);
            }
            _ if in_tag => out.push(ch),
            '\n' => out.push_str("<br/>"),
            '\r' => {}
            ' ' => out.push_str("&nbsp;"),
            '\t' => out.push_str("&nbsp;&nbsp;&nbsp;&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

fn css_color(color: Color) -> String {
    if color.a == 0xFF {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!(
            "rgba({}, {}, {}, {:.2})",
            color.r,
            color.g,
            color.b,
            f32::from(color.a) / 255.0
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Highlighter Instance
// ─────────────────────────────────────────────────────────────────────────────

/// Global highlighter instance, loaded on first use.
static HIGHLIGHTER: OnceLock<CodeHighlighter> = OnceLock::new();

/// Get or create the global highlighter.
pub fn get_highlighter() -> &'static CodeHighlighter {
    HIGHLIGHTER.get_or_init(CodeHighlighter::new)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_gets_token_classes() {
        let html = get_highlighter().highlight("fn main() {}\n", "rust");
        assert!(html.contains("hljs-"));
        assert!(!html.contains('\n'));
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let html = get_highlighter().highlight("a < b\nc", "no-such-language");
        assert_eq!(html, "a&nbsp;&lt;&nbsp;b<br/>c");
    }

    #[test]
    fn test_whitespace_inside_tags_is_kept() {
        let html = preserve_whitespace("<span class=\"a b\">x y</span>\n\tz");
        assert_eq!(
            html,
            "<span class=\"a b\">x&nbsp;y</span><br/>&nbsp;&nbsp;&nbsp;&nbsp;z"
        );
    }

    #[test]
    fn test_language_aliases() {
        let highlighter = get_highlighter();
        assert!(highlighter.find_syntax_for_language("rust").is_some());
        assert!(highlighter.find_syntax_for_language("py").is_some());
        assert!(highlighter.find_syntax_for_language("JavaScript").is_some());
        assert!(highlighter.find_syntax_for_language("").is_none());
    }

    #[test]
    fn test_code_block_structure() {
        let html = render_code_block("let x = 1;\n", "rust", CodeBlockStyle::default());
        assert!(html.starts_with(r#"<pre class="code__pre hljs"><code class="language-rust">"#));
        assert!(!html.contains("mac-sign"));
        assert!(!html.contains("line-numbers"));
    }

    #[test]
    fn test_code_block_decorations() {
        let style = CodeBlockStyle {
            mac_sign: true,
            line_numbers: true,
        };
        let html = render_code_block("a\nb\nc\n", "", style);
        assert!(html.contains(r#"<span class="mac-sign""#));
        assert!(html.contains(r#"<span class="line-numbers">1<br/>2<br/>3</span>"#));
        assert!(html.contains(r#"<code class="language-plaintext">a<br/>b<br/>c</code>"#));
    }

    #[test]
    fn test_theme_css() {
        let highlighter = get_highlighter();
        assert!(highlighter.has_theme("InspiredGitHub"));
        let css = highlighter.theme_css("InspiredGitHub").unwrap();
        assert!(css.starts_with(".code__pre {"));
        assert!(css.contains(".hljs-"));
        assert!(highlighter.theme_css("no-such-theme").is_none());
    }

    #[test]
    fn test_css_color() {
        let opaque = Color {
            r: 255,
            g: 0,
            b: 16,
            a: 255,
        };
        assert_eq!(css_color(opaque), "#ff0010");
        let clear = Color {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        };
        assert_eq!(css_color(clear), "rgba(0, 0, 0, 0.00)");
    }
}
