//! Persistence of settings and documents for mdpress
//!
//! The pipeline never knows where state lives: it talks to a `Storage`
//! keyed by fixed identifiers. `FileStorage` keeps one JSON file per key in
//! the platform config directory (atomic writes through a backup file), and
//! `MemoryStorage` backs tests and one-shot CLI runs.

use crate::config::ThemeSettings;
use crate::document::DocumentCollection;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "mdpress";

/// Storage key for `ThemeSettings`
pub const THEME_STORAGE_KEY: &str = "md-theme-storage";

/// Storage key for the document collection
pub const POST_STORAGE_KEY: &str = "md-post-storage";

/// Storage key for the user's custom CSS
pub const CSS_STORAGE_KEY: &str = "md-css-storage";

// ─────────────────────────────────────────────────────────────────────────────
// Storage Contract
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque key/value store for serialized state.
pub trait Storage {
    /// Read the value stored under `key`, or `None` if nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory storage, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at an explicit directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at the platform config directory.
    ///
    /// - **Windows**: `%APPDATA%\mdpress\`
    /// - **macOS**: `~/Library/Application Support/mdpress/`
    /// - **Linux**: `~/.config/mdpress/`
    pub fn in_config_dir() -> Result<Self> {
        Ok(Self::new(get_config_dir()?))
    }

    /// Directory holding the stored files.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            debug!("Creating storage directory: {}", self.dir.display());
            fs::create_dir_all(&self.dir).map_err(|e| Error::ConfigSave {
                path: self.dir.clone(),
                source: Box::new(e),
            })?;
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!("No stored entry at {}", path.display());
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|e| Error::ConfigLoad {
            path: path.clone(),
            source: Box::new(e),
        })?;

        if contents.trim().is_empty() {
            debug!("Stored entry {} is empty", path.display());
            return Ok(None);
        }

        Ok(Some(contents))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.path_for(key);
        let backup_path = self.dir.join(format!("{}.json.bak", key));

        // Write to backup file first, then rename over the original
        fs::write(&backup_path, value).map_err(|e| Error::ConfigSave {
            path: backup_path.clone(),
            source: Box::new(e),
        })?;
        fs::rename(&backup_path, &path).map_err(|e| Error::ConfigSave {
            path: path.clone(),
            source: Box::new(e),
        })?;

        debug!("Saved {} to {}", key, path.display());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Load theme settings, falling back to defaults on any problem.
pub fn load_theme_settings(storage: &dyn Storage) -> ThemeSettings {
    load_theme_settings_internal(storage)
        .unwrap_or_warn_default(ThemeSettings::default(), "Failed to load theme settings")
}

fn load_theme_settings_internal(storage: &dyn Storage) -> Result<ThemeSettings> {
    let Some(contents) = storage.load(THEME_STORAGE_KEY)? else {
        return Ok(ThemeSettings::default());
    };
    let settings = ThemeSettings::from_json_sanitized(&contents)?;
    info!("Theme settings loaded (theme: {})", settings.theme);
    Ok(settings)
}

/// Save theme settings as pretty JSON.
pub fn save_theme_settings(storage: &mut dyn Storage, settings: &ThemeSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    storage.save(THEME_STORAGE_KEY, &json)
}

// ─────────────────────────────────────────────────────────────────────────────
// Custom CSS
// ─────────────────────────────────────────────────────────────────────────────

/// Load the user's custom CSS, or an empty string.
pub fn load_custom_css(storage: &dyn Storage) -> String {
    storage
        .load(CSS_STORAGE_KEY)
        .map(|css| css.unwrap_or_default())
        .unwrap_or_warn_default(String::new(), "Failed to load custom CSS")
}

/// Save the user's custom CSS verbatim.
pub fn save_custom_css(storage: &mut dyn Storage, css: &str) -> Result<()> {
    storage.save(CSS_STORAGE_KEY, css)
}

// ─────────────────────────────────────────────────────────────────────────────
// Documents
// ─────────────────────────────────────────────────────────────────────────────

/// Load the document collection, falling back to the welcome collection.
///
/// The loaded collection is rehydrated so that it always has a valid
/// current document.
pub fn load_documents(storage: &dyn Storage) -> DocumentCollection {
    let mut collection = load_documents_internal(storage)
        .unwrap_or_warn_default(DocumentCollection::default(), "Failed to load documents");
    collection.rehydrate();
    collection
}

fn load_documents_internal(storage: &dyn Storage) -> Result<DocumentCollection> {
    match storage.load(POST_STORAGE_KEY)? {
        Some(contents) => Ok(serde_json::from_str(&contents)?),
        None => Ok(DocumentCollection::default()),
    }
}

/// Save the document collection as JSON.
pub fn save_documents(storage: &mut dyn Storage, collection: &DocumentCollection) -> Result<()> {
    let json = serde_json::to_string(collection)?;
    storage.save(POST_STORAGE_KEY, &json)
}

/// Save, logging instead of failing.
///
/// Returns `true` if the save was successful.
pub fn save_theme_settings_silent(storage: &mut dyn Storage, settings: &ThemeSettings) -> bool {
    match save_theme_settings(storage, settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save theme settings: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingAction;
    use tempfile::TempDir;

    #[test]
    fn test_get_config_dir_contains_app_name() {
        if let Ok(path) = get_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load("k").unwrap().is_none());
        storage.save("k", "v").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().join("nested"));

        storage.save("entry", "{\"a\":1}").unwrap();
        assert_eq!(storage.load("entry").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(!temp.path().join("nested").join("entry.json.bak").exists());
    }

    #[test]
    fn test_file_storage_missing_and_empty() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        assert!(storage.load("absent").unwrap().is_none());

        fs::write(temp.path().join("blank.json"), "   ").unwrap();
        assert!(storage.load("blank").unwrap().is_none());
    }

    #[test]
    fn test_theme_settings_roundtrip() {
        let mut storage = MemoryStorage::new();
        let mut settings = ThemeSettings::default();
        settings.apply(SettingAction::SetTheme("grace".into()));
        settings.apply(SettingAction::ToggleCiteStatus);

        save_theme_settings(&mut storage, &settings).unwrap();
        assert_eq!(load_theme_settings(&storage), settings);
    }

    #[test]
    fn test_corrupted_theme_settings_fall_back_to_defaults() {
        let mut storage = MemoryStorage::new();
        storage.save(THEME_STORAGE_KEY, "{ invalid json }").unwrap();
        assert_eq!(load_theme_settings(&storage), ThemeSettings::default());
    }

    #[test]
    fn test_partial_theme_settings_use_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .save(THEME_STORAGE_KEY, r##"{"primary_color": "#333"}"##)
            .unwrap();
        let settings = load_theme_settings(&storage);
        assert_eq!(settings.primary_color, "#333");
        assert_eq!(settings.theme, "default");
    }

    #[test]
    fn test_custom_css_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(load_custom_css(&storage), "");
        save_custom_css(&mut storage, "p { color: red; }").unwrap();
        assert_eq!(load_custom_css(&storage), "p { color: red; }");
    }

    #[test]
    fn test_documents_roundtrip() {
        let mut storage = MemoryStorage::new();
        let mut collection = DocumentCollection::default();
        let id = collection.add("Second", None);
        collection.update_content(&id, "# Second\n\nbody").unwrap();

        save_documents(&mut storage, &collection).unwrap();
        let loaded = load_documents(&storage);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.current_id(), id);
        assert_eq!(loaded.get(&id).unwrap().content, "# Second\n\nbody");
    }

    #[test]
    fn test_missing_documents_give_welcome_collection() {
        let storage = MemoryStorage::new();
        let collection = load_documents(&storage);
        assert_eq!(collection.len(), 1);
        assert!(collection.current().is_some());
    }

    #[test]
    fn test_save_theme_settings_silent_reports_success() {
        let mut storage = MemoryStorage::new();
        assert!(save_theme_settings_silent(
            &mut storage,
            &ThemeSettings::default()
        ));
    }
}
