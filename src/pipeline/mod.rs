//! Render-and-publish pipeline
//!
//! The `Pipeline` owns the canonical render output (HTML, table of contents
//! and reading time) and the installed presentation, and decides which stages
//! run for each inbound `PipelineEvent`.
//!
//! # Routing
//!
//! | Event                   | Stages                                     |
//! |-------------------------|--------------------------------------------|
//! | `ContentChanged`        | render, post-process                       |
//! | `OptionsChanged`        | renderer reset, render, post-process       |
//! | `ThemeVariablesChanged` | theme resolve + apply                      |
//! | `CodeThemeChanged`      | code theme swap                            |
//!
//! Everything runs synchronously on the calling thread. A render replaces
//! the output and the title list together, so callers never see one without
//! the other.
//!
//! # Usage
//!
//! ```ignore
//! let mut pipeline = Pipeline::new(PipelineContext::new(settings, custom_css));
//! pipeline.initialize()?;
//! pipeline.dispatch(PipelineEvent::ContentChanged(text))?;
//! let inlined = pipeline.export(ExportFormat::Inline)?;
//! ```

mod events;

pub use events::{PipelineEvent, PipelineState};

use crate::compat::flatten_html;
use crate::config::{RenderOptions, SettingAction, SettingsChange, ThemeSettings};
use crate::error::{Error, Result};
use crate::export::{generate_html_document, ExportFormat};
use crate::markdown::MarkdownRenderer;
use crate::render::{process, ReadingTime, RenderResult, TitleEntry};
use crate::theme::{resolve, Presentation, StyleDefinition, ThemeVariables};
use log::{debug, info};

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// The presentation inputs the pipeline works from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineContext {
    pub settings: ThemeSettings,
    /// User stylesheet appended after the theme rules
    pub custom_css: String,
}

impl PipelineContext {
    pub fn new(settings: ThemeSettings, custom_css: impl Into<String>) -> Self {
        Self {
            settings,
            custom_css: custom_css.into(),
        }
    }

    /// Resolve the configured theme.
    pub fn resolve_theme(&self) -> Result<StyleDefinition> {
        resolve(
            &self.settings.theme,
            &ThemeVariables::from(&self.settings),
            &self.custom_css,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// Coordinates rendering, post-processing and presentation.
#[derive(Debug)]
pub struct Pipeline {
    context: PipelineContext,
    state: PipelineState,
    renderer: Option<MarkdownRenderer>,
    presentation: Presentation,
    /// Source text of the current output
    source: String,
    output: Option<RenderResult>,
    titles: Vec<TitleEntry>,
}

impl Pipeline {
    /// Create an uninitialized pipeline.
    pub fn new(context: PipelineContext) -> Self {
        Self {
            context,
            state: PipelineState::Uninitialized,
            renderer: None,
            presentation: Presentation::new(),
            source: String::new(),
            output: None,
            titles: Vec::new(),
        }
    }

    /// Build the renderer from the context's options and install the theme.
    pub fn initialize(&mut self) -> Result<()> {
        let options = self.context.settings.render_options();
        self.initialize_with(options)
    }

    /// Build the renderer with explicit baseline options and install the theme.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the configured theme does not exist;
    /// the pipeline then stays uninitialized.
    pub fn initialize_with(&mut self, options: RenderOptions) -> Result<()> {
        let definition = self.context.resolve_theme()?;
        self.presentation.apply(definition);
        self.presentation
            .update_code_theme(&self.context.settings.code_block_theme);
        self.renderer = Some(MarkdownRenderer::new(options));
        self.state = PipelineState::Idle;
        info!("Pipeline initialized with theme '{}'", self.context.settings.theme);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Render `text` and replace the current output.
    ///
    /// # Errors
    ///
    /// Returns `Error::Uninitialized` before `initialize`.
    pub fn render(&mut self, text: &str) -> Result<&RenderResult> {
        let renderer = self.renderer.as_ref().ok_or(Error::Uninitialized)?;
        self.state = PipelineState::Rendering;

        let fragment = renderer.render(text);
        let processed = process(&fragment, text, renderer.options());

        self.source = text.to_string();
        self.titles = processed.titles;
        let output = &*self.output.insert(RenderResult {
            html: processed.html,
            reading_time: processed.reading_time,
        });
        self.state = PipelineState::Ready;
        debug!(
            "Rendered {} chars into {} bytes",
            output.reading_time.characters,
            output.html.len()
        );
        Ok(output)
    }

    /// Route one event to the stages it affects.
    pub fn dispatch(&mut self, event: PipelineEvent) -> Result<()> {
        debug!("Dispatching {}", event.name());
        match event {
            PipelineEvent::ContentChanged(text) => {
                self.render(&text)?;
            }
            PipelineEvent::OptionsChanged(options) => {
                let renderer = self.renderer.as_mut().ok_or(Error::Uninitialized)?;
                renderer.reset(options);
                // Nothing rendered yet: the next content change picks up the options
                if self.output.is_some() {
                    let source = std::mem::take(&mut self.source);
                    self.render(&source)?;
                }
            }
            PipelineEvent::ThemeVariablesChanged => self.apply_theme()?,
            PipelineEvent::CodeThemeChanged(reference) => {
                self.context.settings.code_block_theme = reference;
                self.presentation
                    .update_code_theme(&self.context.settings.code_block_theme);
            }
        }
        Ok(())
    }

    /// Resolve the configured theme and install it.
    ///
    /// The code theme and the render output are left untouched.
    pub fn apply_theme(&mut self) -> Result<()> {
        let definition = self.context.resolve_theme()?;
        self.presentation.apply(definition);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a setter action and re-run the stages it invalidates.
    ///
    /// The action is applied to a copy of the settings and validated first;
    /// if the resulting theme cannot be resolved nothing changes. Before
    /// initialization only the settings and presentation are updated.
    pub fn change_settings(&mut self, action: SettingAction) -> Result<SettingsChange> {
        let mut settings = self.context.settings.clone();
        let change = settings.apply(action);
        if change.theme {
            PipelineContext::new(settings.clone(), self.context.custom_css.as_str())
                .resolve_theme()?;
        }
        self.context.settings = settings;

        for event in PipelineEvent::for_change(change, &self.context.settings) {
            if matches!(event, PipelineEvent::OptionsChanged(_)) && self.renderer.is_none() {
                continue;
            }
            self.dispatch(event)?;
        }
        Ok(change)
    }

    /// Replace the custom stylesheet and reapply the theme.
    ///
    /// An unresolvable theme leaves the previous stylesheet in place.
    pub fn set_custom_css(&mut self, css: impl Into<String>) -> Result<()> {
        let context = PipelineContext::new(self.context.settings.clone(), css);
        let definition = context.resolve_theme()?;
        self.context = context;
        self.presentation.apply(definition);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// The current render output, if anything has been rendered.
    pub fn output(&self) -> Option<&RenderResult> {
        self.output.as_ref()
    }

    /// The table of contents of the current output.
    pub fn titles(&self) -> &[TitleEntry] {
        &self.titles
    }

    pub fn reading_time(&self) -> Option<ReadingTime> {
        self.output.as_ref().map(|o| o.reading_time)
    }

    /// The source text of the current output.
    pub fn source(&self) -> &str {
        &self.source
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Produce the current output in `format`.
    ///
    /// Flattening works on a disposable copy; the canonical output is never
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns `Error::Uninitialized` if nothing has been rendered yet.
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        let output = self.output.as_ref().ok_or(Error::Uninitialized)?;
        let exported = match format {
            ExportFormat::Markdown => self.source.clone(),
            ExportFormat::Html => output.html.clone(),
            ExportFormat::Inline => self.flattened_html(&output.html),
            ExportFormat::Document => generate_html_document(
                &output.html,
                self.document_title(),
                &self.presentation.stylesheet(),
                self.context.settings.preview_width,
            ),
        };
        debug!("Exported {} ({} bytes)", format.label(), exported.len());
        Ok(exported)
    }

    fn flattened_html(&self, html: &str) -> String {
        match self.presentation.cascade_definition() {
            Some(definition) => {
                flatten_html(html, &definition, &self.context.settings.primary_color)
            }
            None => {
                debug!("No theme installed, nothing to flatten");
                html.to_string()
            }
        }
    }

    /// Text of the first top-level heading.
    fn document_title(&self) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.level == 1)
            .map(|t| t.text.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
