//! Presentation settings for mdpress
//!
//! This module defines the `ThemeSettings` struct that holds every
//! user-configurable style option, with serde support for JSON persistence.
//! Settings are mutated only through discrete `SettingAction`s, each of which
//! reports which pipeline stages it invalidates.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Legend Format
// ─────────────────────────────────────────────────────────────────────────────

/// How an image's figure caption is derived from its title and alt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LegendFormat {
    /// Title if present, otherwise alt
    TitleAlt,
    /// Alt if present, otherwise title
    AltTitle,
    /// Title only
    Title,
    /// Alt only
    #[default]
    Alt,
    /// No caption
    None,
}

impl LegendFormat {
    /// Pick the caption for an image, or `None` when nothing should be shown.
    pub fn caption<'a>(&self, title: &'a str, alt: &'a str) -> Option<&'a str> {
        let non_empty = |s: &'a str| if s.is_empty() { None } else { Some(s) };
        match self {
            LegendFormat::TitleAlt => non_empty(title).or_else(|| non_empty(alt)),
            LegendFormat::AltTitle => non_empty(alt).or_else(|| non_empty(title)),
            LegendFormat::Title => non_empty(title),
            LegendFormat::Alt => non_empty(alt),
            LegendFormat::None => None,
        }
    }

    /// Get a display label for the format.
    pub fn label(&self) -> &'static str {
        match self {
            LegendFormat::TitleAlt => "Title, then alt",
            LegendFormat::AltTitle => "Alt, then title",
            LegendFormat::Title => "Title only",
            LegendFormat::Alt => "Alt only",
            LegendFormat::None => "No caption",
        }
    }

    /// Get all available legend formats.
    pub fn all() -> &'static [LegendFormat] {
        &[
            LegendFormat::TitleAlt,
            LegendFormat::AltTitle,
            LegendFormat::Title,
            LegendFormat::Alt,
            LegendFormat::None,
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Width
// ─────────────────────────────────────────────────────────────────────────────

/// Width of the preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreviewWidth {
    /// Phone-sized column, matching how most readers see a published post
    #[default]
    Mobile,
    /// Full available width
    Desktop,
}

impl PreviewWidth {
    /// CSS class applied to the preview wrapper.
    pub fn css_class(&self) -> &'static str {
        match self {
            PreviewWidth::Mobile => "preview-mobile",
            PreviewWidth::Desktop => "preview-desktop",
        }
    }

    /// Toggle between mobile and desktop.
    pub fn toggle(&self) -> Self {
        match self {
            PreviewWidth::Mobile => PreviewWidth::Desktop,
            PreviewWidth::Desktop => PreviewWidth::Mobile,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Render Options
// ─────────────────────────────────────────────────────────────────────────────

/// Structural options for one markdown render.
///
/// Derived fresh from `ThemeSettings` for every render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Render external links as numbered citations collected at the end
    pub cite_as_footnote: bool,
    /// Figure caption format for images
    pub legend_format: LegendFormat,
    /// Show a line-number gutter in code blocks
    pub show_line_numbers: bool,
    /// Decorate code blocks with a macOS-style window bar
    pub mac_style_code_block: bool,
    /// Prepend a word-count / reading-time banner
    pub count_status: bool,
    /// Indent the first line of paragraphs
    pub use_indent: bool,
    /// Justify paragraph text
    pub use_justify: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Setting Actions
// ─────────────────────────────────────────────────────────────────────────────

/// A discrete user action on the presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingAction {
    SetTheme(String),
    SetFontFamily(String),
    SetFontSize(String),
    SetPrimaryColor(String),
    SetCodeBlockTheme(String),
    SetLegend(LegendFormat),
    SetPreviewWidth(PreviewWidth),
    ToggleMacCodeBlock,
    ToggleShowLineNumber,
    ToggleCiteStatus,
    ToggleCountStatus,
    ToggleUseIndent,
    ToggleUseJustify,
    /// Restore every style field to its default (preview width is kept)
    ResetStyle,
}

/// Which pipeline stages a settings change invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsChange {
    /// Markdown must be re-rendered
    pub render: bool,
    /// Theme variables must be resolved and applied again
    pub theme: bool,
    /// Only the code highlight stylesheet must be swapped
    pub code_theme: bool,
}

impl SettingsChange {
    const RENDER: Self = Self {
        render: true,
        theme: false,
        code_theme: false,
    };
    const THEME: Self = Self {
        render: false,
        theme: true,
        code_theme: false,
    };
    const CODE_THEME: Self = Self {
        render: false,
        theme: false,
        code_theme: true,
    };
    const ALL: Self = Self {
        render: true,
        theme: true,
        code_theme: true,
    };

    /// Whether nothing needs to be recomputed.
    pub fn is_layout_only(&self) -> bool {
        !self.render && !self.theme && !self.code_theme
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User presentation preferences.
///
/// This struct is serialized to JSON and persisted under a fixed storage key.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    // ─────────────────────────────────────────────────────────────────────────
    // Theme variables
    // ─────────────────────────────────────────────────────────────────────────
    /// Name of the built-in theme
    pub theme: String,

    /// CSS font-family list for body text
    pub font_family: String,

    /// CSS font size for body text (e.g. "16px")
    pub font_size: String,

    /// Accent color used by headings, quotes and emphasis
    pub primary_color: String,

    /// Indent the first line of paragraphs
    pub use_indent: bool,

    /// Justify paragraph text
    pub use_justify: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Code blocks
    // ─────────────────────────────────────────────────────────────────────────
    /// Highlight stylesheet reference: a bundled syntect theme name or a URL
    pub code_block_theme: String,

    /// Decorate code blocks with a macOS-style window bar
    pub mac_code_block: bool,

    /// Show line numbers in code blocks
    pub show_line_numbers: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Structure
    // ─────────────────────────────────────────────────────────────────────────
    /// Image caption format
    pub legend: LegendFormat,

    /// Convert external links into numbered citations
    pub cite_status: bool,

    /// Show the word-count banner at the top of the output
    pub count_status: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────
    /// Width of the preview surface
    pub preview_width: PreviewWidth,
}

/// Default body font stack.
pub const DEFAULT_FONT_FAMILY: &str = "-apple-system-font,BlinkMacSystemFont, Helvetica Neue, PingFang SC, Hiragino Sans GB , Microsoft YaHei UI , Microsoft YaHei ,Arial,sans-serif";

/// Default body font size.
pub const DEFAULT_FONT_SIZE: &str = "16px";

/// Default accent color.
pub const DEFAULT_PRIMARY_COLOR: &str = "#0F4C81";

/// Default code highlight theme (bundled with syntect).
pub const DEFAULT_CODE_THEME: &str = "base16-ocean.dark";

/// Default theme name.
pub const DEFAULT_THEME: &str = "default";

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            use_indent: false,
            use_justify: false,

            code_block_theme: DEFAULT_CODE_THEME.to_string(),
            mac_code_block: true,
            show_line_numbers: false,

            legend: LegendFormat::default(),
            cite_status: false,
            count_status: false,

            preview_width: PreviewWidth::default(),
        }
    }
}

impl ThemeSettings {
    /// The structural options for the next render.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            cite_as_footnote: self.cite_status,
            legend_format: self.legend,
            show_line_numbers: self.show_line_numbers,
            mac_style_code_block: self.mac_code_block,
            count_status: self.count_status,
            use_indent: self.use_indent,
            use_justify: self.use_justify,
        }
    }

    /// Apply one setter action and report what it invalidates.
    ///
    /// Every action touches exactly one field, except `ResetStyle`.
    pub fn apply(&mut self, action: SettingAction) -> SettingsChange {
        match action {
            SettingAction::SetTheme(theme) => {
                self.theme = theme;
                SettingsChange::THEME
            }
            SettingAction::SetFontFamily(font) => {
                self.font_family = font;
                SettingsChange::THEME
            }
            SettingAction::SetFontSize(size) => {
                self.font_size = size;
                SettingsChange::THEME
            }
            SettingAction::SetPrimaryColor(color) => {
                self.primary_color = color;
                SettingsChange::THEME
            }
            SettingAction::SetCodeBlockTheme(reference) => {
                self.code_block_theme = reference;
                SettingsChange::CODE_THEME
            }
            SettingAction::SetLegend(legend) => {
                self.legend = legend;
                SettingsChange::RENDER
            }
            SettingAction::SetPreviewWidth(width) => {
                self.preview_width = width;
                SettingsChange::default()
            }
            SettingAction::ToggleMacCodeBlock => {
                self.mac_code_block = !self.mac_code_block;
                SettingsChange::RENDER
            }
            SettingAction::ToggleShowLineNumber => {
                self.show_line_numbers = !self.show_line_numbers;
                SettingsChange::RENDER
            }
            SettingAction::ToggleCiteStatus => {
                self.cite_status = !self.cite_status;
                SettingsChange::RENDER
            }
            SettingAction::ToggleCountStatus => {
                self.count_status = !self.count_status;
                SettingsChange::RENDER
            }
            SettingAction::ToggleUseIndent => {
                self.use_indent = !self.use_indent;
                SettingsChange {
                    render: true,
                    theme: true,
                    code_theme: false,
                }
            }
            SettingAction::ToggleUseJustify => {
                self.use_justify = !self.use_justify;
                SettingsChange {
                    render: true,
                    theme: true,
                    code_theme: false,
                }
            }
            SettingAction::ResetStyle => {
                let preview_width = self.preview_width;
                *self = Self {
                    preview_width,
                    ..Self::default()
                };
                SettingsChange::ALL
            }
        }
    }

    /// Replace blank string fields with their defaults.
    ///
    /// Values are otherwise accepted as-is; any string is a valid color.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        if self.theme.trim().is_empty() {
            self.theme = defaults.theme;
        }
        if self.font_family.trim().is_empty() {
            self.font_family = defaults.font_family;
        }
        if self.font_size.trim().is_empty() {
            self.font_size = defaults.font_size;
        }
        if self.primary_color.trim().is_empty() {
            self.primary_color = defaults.primary_color;
        }
        if self.code_block_theme.trim().is_empty() {
            self.code_block_theme = defaults.code_block_theme;
        }
    }

    /// Load settings and sanitize them to ensure validity.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ThemeSettings::default();
        assert_eq!(settings.theme, "default");
        assert_eq!(settings.font_size, "16px");
        assert_eq!(settings.primary_color, "#0F4C81");
        assert!(settings.mac_code_block);
        assert!(!settings.show_line_numbers);
        assert_eq!(settings.legend, LegendFormat::Alt);
        assert_eq!(settings.preview_width, PreviewWidth::Mobile);
    }

    #[test]
    fn test_render_options_follow_settings() {
        let mut settings = ThemeSettings::default();
        settings.cite_status = true;
        settings.legend = LegendFormat::TitleAlt;
        let options = settings.render_options();
        assert!(options.cite_as_footnote);
        assert_eq!(options.legend_format, LegendFormat::TitleAlt);
        assert!(options.mac_style_code_block);
    }

    #[test]
    fn test_setter_touches_only_its_field() {
        let mut settings = ThemeSettings::default();
        let before = settings.clone();
        let change = settings.apply(SettingAction::SetPrimaryColor("#ff0000".to_string()));

        assert_eq!(settings.primary_color, "#ff0000");
        assert_eq!(
            ThemeSettings {
                primary_color: before.primary_color.clone(),
                ..settings.clone()
            },
            before
        );
        assert!(change.theme);
        assert!(!change.render);
        assert!(!change.code_theme);
    }

    #[test]
    fn test_code_theme_change_is_isolated() {
        let mut settings = ThemeSettings::default();
        let change = settings.apply(SettingAction::SetCodeBlockTheme("InspiredGitHub".into()));
        assert_eq!(
            change,
            SettingsChange {
                render: false,
                theme: false,
                code_theme: true
            }
        );
    }

    #[test]
    fn test_structural_toggles_request_render() {
        let mut settings = ThemeSettings::default();
        assert!(settings.apply(SettingAction::ToggleShowLineNumber).render);
        assert!(settings.show_line_numbers);
        assert!(settings.apply(SettingAction::ToggleCiteStatus).render);
        assert!(settings.cite_status);
        assert!(settings.apply(SettingAction::SetLegend(LegendFormat::None)).render);
        assert_eq!(settings.legend, LegendFormat::None);
    }

    #[test]
    fn test_indent_toggle_requests_render_and_theme() {
        let mut settings = ThemeSettings::default();
        let change = settings.apply(SettingAction::ToggleUseIndent);
        assert!(settings.use_indent);
        assert!(change.render && change.theme);
    }

    #[test]
    fn test_preview_width_is_layout_only() {
        let mut settings = ThemeSettings::default();
        let change = settings.apply(SettingAction::SetPreviewWidth(PreviewWidth::Desktop));
        assert!(change.is_layout_only());
        assert_eq!(settings.preview_width.css_class(), "preview-desktop");
    }

    #[test]
    fn test_reset_style_keeps_preview_width() {
        let mut settings = ThemeSettings::default();
        settings.apply(SettingAction::SetTheme("grace".into()));
        settings.apply(SettingAction::ToggleCountStatus);
        settings.apply(SettingAction::SetPreviewWidth(PreviewWidth::Desktop));

        let change = settings.apply(SettingAction::ResetStyle);
        assert_eq!(change, SettingsChange::ALL);
        assert_eq!(settings.theme, "default");
        assert!(!settings.count_status);
        assert_eq!(settings.preview_width, PreviewWidth::Desktop);
    }

    #[test]
    fn test_legend_caption() {
        assert_eq!(LegendFormat::TitleAlt.caption("T", "A"), Some("T"));
        assert_eq!(LegendFormat::TitleAlt.caption("", "A"), Some("A"));
        assert_eq!(LegendFormat::AltTitle.caption("T", "A"), Some("A"));
        assert_eq!(LegendFormat::AltTitle.caption("T", ""), Some("T"));
        assert_eq!(LegendFormat::Title.caption("", "A"), None);
        assert_eq!(LegendFormat::Alt.caption("T", "A"), Some("A"));
        assert_eq!(LegendFormat::None.caption("T", "A"), None);
    }

    #[test]
    fn test_legend_serialization() {
        assert_eq!(
            serde_json::to_string(&LegendFormat::TitleAlt).unwrap(),
            "\"title-alt\""
        );
        assert_eq!(
            serde_json::from_str::<LegendFormat>("\"none\"").unwrap(),
            LegendFormat::None
        );
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: ThemeSettings = serde_json::from_str(r#"{"theme": "simple"}"#).unwrap();
        assert_eq!(settings.theme, "simple");
        assert_eq!(settings.font_size, DEFAULT_FONT_SIZE);
        assert!(settings.mac_code_block);
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let mut original = ThemeSettings::default();
        original.apply(SettingAction::ToggleUseJustify);
        let json = serde_json::to_string_pretty(&original).unwrap();
        let deserialized: ThemeSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_from_json_sanitized_fills_blanks() {
        let settings =
            ThemeSettings::from_json_sanitized(r#"{"theme": " ", "primary_color": ""}"#).unwrap();
        assert_eq!(settings.theme, DEFAULT_THEME);
        assert_eq!(settings.primary_color, DEFAULT_PRIMARY_COLOR);
    }
}
