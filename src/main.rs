//! mdpress - Main Entry Point
//!
//! Renders a markdown file into themed HTML and writes it to stdout, a file
//! or the clipboard.

use clap::{Parser, ValueEnum};
use log::{info, warn};
use mdpress::config::{
    load_custom_css, load_documents, load_theme_settings, save_custom_css, save_documents,
    save_theme_settings, FileStorage, LegendFormat, MemoryStorage, SettingAction, Storage,
};
use mdpress::error::{Error, Result};
use mdpress::export::{copy_to_clipboard, write_export, ClipboardPayload, CopyMode, ExportFormat};
use mdpress::render::toc;
use mdpress::{Pipeline, PipelineContext, PipelineEvent};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Application name constant.
const APP_NAME: &str = "mdpress";

// ─────────────────────────────────────────────────────────────────────────────
// Command Line
// ─────────────────────────────────────────────────────────────────────────────

/// Render markdown into themed, paste-ready HTML.
#[derive(Parser)]
#[command(name = "mdpress", version, about)]
struct Cli {
    /// Markdown file to render ("-" reads stdin)
    input: PathBuf,

    /// What to produce
    #[arg(short, long, value_enum, default_value_t = FormatArg::Inline)]
    format: FormatArg,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Copy to the clipboard instead of printing
    #[arg(long, value_enum, num_args = 0..=1, default_missing_value = "txt")]
    copy: Option<CopyArg>,

    /// Built-in theme (default, grace, simple)
    #[arg(long)]
    theme: Option<String>,

    /// Primary color, any CSS color
    #[arg(long)]
    primary_color: Option<String>,

    /// Body font size, e.g. 15px
    #[arg(long)]
    font_size: Option<String>,

    /// Bundled code theme name or stylesheet URL
    #[arg(long)]
    code_theme: Option<String>,

    /// Extra stylesheet appended after the theme
    #[arg(long)]
    css: Option<PathBuf>,

    /// Image caption format
    #[arg(long, value_enum)]
    legend: Option<LegendArg>,

    /// Turn external links into numbered citations
    #[arg(long)]
    cite: bool,

    /// Prepend the word count and reading time
    #[arg(long)]
    count: bool,

    /// Show line numbers in code blocks
    #[arg(long)]
    line_numbers: bool,

    /// Drop the window bar from code blocks
    #[arg(long)]
    no_mac: bool,

    /// Print the table of contents to stderr
    #[arg(long)]
    toc: bool,

    /// Persist the resulting settings (and --css) as the new defaults
    #[arg(long)]
    save_settings: bool,

    /// Record the input in the saved document collection
    #[arg(long)]
    save_document: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Markdown,
    Html,
    Inline,
    Document,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markdown => ExportFormat::Markdown,
            FormatArg::Html => ExportFormat::Html,
            FormatArg::Inline => ExportFormat::Inline,
            FormatArg::Document => ExportFormat::Document,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CopyArg {
    Txt,
    Md,
    Html,
}

impl From<CopyArg> for CopyMode {
    fn from(arg: CopyArg) -> Self {
        match arg {
            CopyArg::Txt => CopyMode::Txt,
            CopyArg::Md => CopyMode::Md,
            CopyArg::Html => CopyMode::Html,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LegendArg {
    TitleAlt,
    AltTitle,
    Title,
    Alt,
    None,
}

impl From<LegendArg> for LegendFormat {
    fn from(arg: LegendArg) -> Self {
        match arg {
            LegendArg::TitleAlt => LegendFormat::TitleAlt,
            LegendArg::AltTitle => LegendFormat::AltTitle,
            LegendArg::Title => LegendFormat::Title,
            LegendArg::Alt => LegendFormat::Alt,
            LegendArg::None => LegendFormat::None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    info!("Starting {}", APP_NAME);

    let mut storage = open_storage();
    let settings = load_theme_settings(storage.as_ref());
    let custom_css = match &cli.css {
        Some(path) => read_file(path)?,
        None => load_custom_css(storage.as_ref()),
    };

    let mut pipeline = Pipeline::new(PipelineContext::new(settings, custom_css));
    for action in setting_actions(&cli, &pipeline) {
        pipeline.change_settings(action)?;
    }

    let source = read_input(&cli.input)?;
    pipeline.initialize()?;
    pipeline.dispatch(PipelineEvent::ContentChanged(source.clone()))?;

    if let Some(time) = pipeline.reading_time() {
        info!("{}", time.format_compact());
    }
    if cli.toc {
        eprint!("{}", toc::to_outline(pipeline.titles()));
        info!("{}", toc::summary(pipeline.titles()));
    }

    match cli.copy {
        Some(mode) => {
            let mode = CopyMode::from(mode);
            let content = pipeline.export(mode.format())?;
            copy_to_clipboard(&ClipboardPayload::for_mode(mode, &content))?;
        }
        None => {
            let content = pipeline.export(cli.format.into())?;
            match &cli.output {
                Some(path) => write_export(path, &content)?,
                None => println!("{}", content),
            }
        }
    }

    if cli.save_settings {
        save_theme_settings(storage.as_mut(), &pipeline.context().settings)?;
        if cli.css.is_some() {
            save_custom_css(storage.as_mut(), &pipeline.context().custom_css)?;
        }
    }
    if cli.save_document {
        save_to_collection(storage.as_mut(), &cli.input, &source)?;
    }
    Ok(())
}

/// The setter actions that bring the stored settings in line with the flags.
fn setting_actions(cli: &Cli, pipeline: &Pipeline) -> Vec<SettingAction> {
    let settings = &pipeline.context().settings;
    let mut actions = Vec::new();

    if let Some(theme) = &cli.theme {
        actions.push(SettingAction::SetTheme(theme.clone()));
    }
    if let Some(color) = &cli.primary_color {
        actions.push(SettingAction::SetPrimaryColor(color.clone()));
    }
    if let Some(size) = &cli.font_size {
        actions.push(SettingAction::SetFontSize(size.clone()));
    }
    if let Some(reference) = &cli.code_theme {
        actions.push(SettingAction::SetCodeBlockTheme(reference.clone()));
    }
    if let Some(legend) = cli.legend {
        actions.push(SettingAction::SetLegend(legend.into()));
    }
    if cli.cite && !settings.cite_status {
        actions.push(SettingAction::ToggleCiteStatus);
    }
    if cli.count && !settings.count_status {
        actions.push(SettingAction::ToggleCountStatus);
    }
    if cli.line_numbers && !settings.show_line_numbers {
        actions.push(SettingAction::ToggleShowLineNumber);
    }
    if cli.no_mac && settings.mac_code_block {
        actions.push(SettingAction::ToggleMacCodeBlock);
    }
    actions
}

// ─────────────────────────────────────────────────────────────────────────────
// I/O Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn open_storage() -> Box<dyn Storage> {
    match FileStorage::in_config_dir() {
        Ok(storage) => Box::new(storage),
        Err(err) => {
            warn!("{}. Settings will not be persisted.", err);
            Box::new(MemoryStorage::new())
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::DocumentNotFound(path.display().to_string())
        } else {
            Error::Io(e)
        }
    })
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        read_file(path)
    }
}

fn save_to_collection(storage: &mut dyn Storage, input: &Path, source: &str) -> Result<()> {
    let mut collection = load_documents(storage);
    let title = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");

    let existing = collection
        .iter()
        .find(|d| d.title == title)
        .map(|d| d.id.clone());
    let id = match existing {
        Some(id) => id,
        None => collection.add(title, None),
    };
    collection.set_current(&id)?;
    collection.update_content(&id, source)?;
    collection.record_snapshot(&id)?;
    save_documents(storage, &collection)?;
    info!("Saved '{}' to the document collection", title);
    Ok(())
}
