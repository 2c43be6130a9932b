//! Pipeline events and states

use crate::config::{RenderOptions, SettingsChange, ThemeSettings};

/// Lifecycle of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// Constructed, but no renderer exists yet
    #[default]
    Uninitialized,
    /// Initialized, nothing rendered yet
    Idle,
    /// A render pass is running
    Rendering,
    /// The output reflects the latest content and options
    Ready,
}

/// One inbound trigger for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// The document text changed
    ContentChanged(String),
    /// Structural render options changed
    OptionsChanged(RenderOptions),
    /// Theme name, variables or custom CSS changed
    ThemeVariablesChanged,
    /// The code highlight stylesheet reference changed
    CodeThemeChanged(String),
}

impl PipelineEvent {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            PipelineEvent::ContentChanged(_) => "ContentChanged",
            PipelineEvent::OptionsChanged(_) => "OptionsChanged",
            PipelineEvent::ThemeVariablesChanged => "ThemeVariablesChanged",
            PipelineEvent::CodeThemeChanged(_) => "CodeThemeChanged",
        }
    }

    /// Events that carry a settings change to the affected stages.
    ///
    /// Theme events come before render events.
    pub fn for_change(change: SettingsChange, settings: &ThemeSettings) -> Vec<PipelineEvent> {
        let mut events = Vec::new();
        if change.theme {
            events.push(PipelineEvent::ThemeVariablesChanged);
        }
        if change.code_theme {
            events.push(PipelineEvent::CodeThemeChanged(
                settings.code_block_theme.clone(),
            ));
        }
        if change.render {
            events.push(PipelineEvent::OptionsChanged(settings.render_options()));
        }
        events
    }
}
