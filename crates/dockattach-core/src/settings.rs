//! Persistence of last-used selections
//!
//! Selections are stored under a fixed collection name in a JSON file,
//! one object per collection with the keys `container`, `vsdbg` and
//! `processname`.

use crate::error::{AttachError, ConfigError, Result};
use crate::models::PersistedSettings;
use directories::ProjectDirs;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Collection the attach session reads and writes
pub const SETTINGS_COLLECTION: &str = "AttachToDockerContainer";

/// Settings file name
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Environment variable overriding the settings directory
pub const SETTINGS_HOME_ENV: &str = "DOCKATTACH_SETTINGS_HOME";

/// Persists last-used selections across sessions
pub trait SettingsStore {
    /// Read the stored selections. A missing collection reads as empty.
    fn load(&self) -> Result<PersistedSettings>;

    /// Replace the stored selections
    fn save(&self, settings: &PersistedSettings) -> Result<()>;
}

type Collections = BTreeMap<String, PersistedSettings>;

/// Settings store backed by a JSON file in the user's config directory
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    settings_dir: PathBuf,
    collection: String,
}

impl JsonSettingsStore {
    /// Create a store rooted at an explicit directory.
    ///
    /// This is the primary constructor, supporting dependency injection
    /// for testing without environment variable manipulation.
    pub fn new(settings_dir: PathBuf) -> Self {
        Self {
            settings_dir,
            collection: SETTINGS_COLLECTION.to_string(),
        }
    }

    /// Create a store using the platform-specific config directory.
    ///
    /// - macOS: ~/Library/Application Support/dockattach/
    /// - Linux: $XDG_CONFIG_HOME/dockattach/
    /// - Windows: %APPDATA%\dockattach\
    ///
    /// `DOCKATTACH_SETTINGS_HOME` overrides the directory.
    pub fn with_defaults() -> std::result::Result<Self, ConfigError> {
        if let Ok(override_path) = std::env::var(SETTINGS_HOME_ENV) {
            return Ok(Self::new(PathBuf::from(override_path)));
        }

        let project_dirs =
            ProjectDirs::from("", "", "dockattach").ok_or(ConfigError::NoSettingsDirectory)?;

        Ok(Self::new(project_dirs.config_dir().to_path_buf()))
    }

    /// Use a different collection name within the same file
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Get the settings directory
    pub fn settings_dir(&self) -> &Path {
        &self.settings_dir
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> PathBuf {
        self.settings_dir.join(SETTINGS_FILE_NAME)
    }

    /// Remove the collection, leaving other collections untouched.
    ///
    /// An unparseable settings file is replaced with an empty one.
    /// Returns true if something was removed.
    pub fn clear(&self) -> Result<bool> {
        let (mut collections, replaced) = self.read_collections_for_update()?;
        let removed = collections.remove(&self.collection).is_some() || replaced;
        if removed {
            self.write_collections(&collections)?;
        }
        Ok(removed)
    }

    /// Check if the settings directory is writable
    pub fn is_writable(&self) -> bool {
        if fs::create_dir_all(&self.settings_dir).is_err() {
            return false;
        }

        let test_file = self.settings_dir.join(".write_test");
        if fs::write(&test_file, "test").is_ok() {
            let _ = fs::remove_file(&test_file);
            true
        } else {
            false
        }
    }

    fn read_collections(&self) -> Result<Collections> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(Collections::new());
        }

        let contents = fs::read_to_string(&path)?;
        let collections = serde_json::from_str(&contents).map_err(ConfigError::ParseError)?;
        Ok(collections)
    }

    /// Read collections that are about to be rewritten. A corrupt file
    /// starts over from nothing; the flag reports that it was discarded.
    fn read_collections_for_update(&self) -> Result<(Collections, bool)> {
        match self.read_collections() {
            Err(AttachError::Config(ConfigError::ParseError(e))) => {
                warn!(
                    path = %self.settings_path().display(),
                    error = %e,
                    "discarding unreadable settings file"
                );
                Ok((Collections::new(), true))
            }
            other => other.map(|collections| (collections, false)),
        }
    }

    /// Write all collections atomically (temp file, then rename).
    fn write_collections(&self, collections: &Collections) -> Result<()> {
        fs::create_dir_all(&self.settings_dir)?;

        let path = self.settings_path();
        let temp_path = path.with_extension("json.tmp");

        let contents =
            serde_json::to_string_pretty(collections).map_err(ConfigError::ParseError)?;
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<PersistedSettings> {
        let collections = self.read_collections()?;
        Ok(collections
            .get(&self.collection)
            .cloned()
            .unwrap_or_default())
    }

    fn save(&self, settings: &PersistedSettings) -> Result<()> {
        let (mut collections, _) = self.read_collections_for_update()?;
        collections.insert(self.collection.clone(), settings.clone());
        self.write_collections(&collections)?;

        debug!(path = %self.settings_path().display(), "saved attach settings");
        Ok(())
    }
}

/// Settings store kept in memory, for embedding and tests
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RefCell<PersistedSettings>,
    saves: RefCell<usize>,
}

impl MemorySettingsStore {
    pub fn new(settings: PersistedSettings) -> Self {
        Self {
            settings: RefCell::new(settings),
            saves: RefCell::new(0),
        }
    }

    /// Current contents
    pub fn snapshot(&self) -> PersistedSettings {
        self.settings.borrow().clone()
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<PersistedSettings> {
        Ok(self.snapshot())
    }

    fn save(&self, settings: &PersistedSettings) -> Result<()> {
        *self.settings.borrow_mut() = settings.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn test_store() -> (JsonSettingsStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = JsonSettingsStore::new(temp.path().join("settings"));
        (store, temp)
    }

    fn sample() -> PersistedSettings {
        PersistedSettings {
            container: Some("api".to_string()),
            debugger_path: Some("/vsdbg/vsdbg".to_string()),
            process_name: Some("dotnet".to_string()),
        }
    }

    #[test]
    fn test_load_without_file_is_empty() {
        let (store, _temp) = test_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (store, _temp) = test_store();

        store.save(&sample()).unwrap();

        assert_eq!(store.load().unwrap(), sample());
        assert!(!store.settings_path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_layout() {
        let (store, _temp) = test_store();
        store.save(&sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.settings_path()).unwrap()).unwrap();
        assert_eq!(raw[SETTINGS_COLLECTION]["container"], "api");
        assert_eq!(raw[SETTINGS_COLLECTION]["vsdbg"], "/vsdbg/vsdbg");
        assert_eq!(raw[SETTINGS_COLLECTION]["processname"], "dotnet");
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let (store, _temp) = test_store();
        store.save(&sample()).unwrap();

        let other = store.clone().with_collection("Other");
        assert!(other.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_keeps_other_collections() {
        let (store, _temp) = test_store();
        let other = store.clone().with_collection("Other");

        other.save(&sample()).unwrap();
        store.save(&PersistedSettings::default()).unwrap();

        assert_eq!(other.load().unwrap(), sample());
    }

    #[test]
    fn test_clear() {
        let (store, _temp) = test_store();
        store.save(&sample()).unwrap();

        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_empty());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let (store, _temp) = test_store();
        fs::create_dir_all(store.settings_dir()).unwrap();
        fs::write(store.settings_path(), "not json").unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn test_save_replaces_corrupt_file() {
        let (store, _temp) = test_store();
        fs::create_dir_all(store.settings_dir()).unwrap();
        fs::write(store.settings_path(), "{ truncated").unwrap();

        store.save(&sample()).unwrap();

        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn test_clear_replaces_corrupt_file() {
        let (store, _temp) = test_store();
        fs::create_dir_all(store.settings_dir()).unwrap();
        fs::write(store.settings_path(), "{ truncated").unwrap();

        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_empty());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_is_writable() {
        let (store, _temp) = test_store();
        assert!(store.is_writable());
        assert!(store.settings_dir().exists());
    }

    #[test]
    #[serial]
    fn test_with_defaults_honours_override() {
        let temp = TempDir::new().unwrap();
        std::env::set_var(SETTINGS_HOME_ENV, temp.path());

        let store = JsonSettingsStore::with_defaults().unwrap();
        std::env::remove_var(SETTINGS_HOME_ENV);

        assert_eq!(store.settings_dir(), temp.path());
        assert_eq!(store.settings_path(), temp.path().join("settings.json"));
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let store = MemorySettingsStore::default();
        assert!(store.load().unwrap().is_empty());

        store.save(&sample()).unwrap();

        assert_eq!(store.snapshot(), sample());
        assert_eq!(store.save_count(), 1);
    }
}
