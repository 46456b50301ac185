// Key-value store for UI preferences that survive restarts.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

pub const GRID_PREFS_KEY: &str = "articles-grid";
pub const THEME_MODE_KEY: &str = "theme-mode";

const APP_NAME: &str = "articles-manager";

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPrefs {
    pub page_size: usize,
}

/// Saved page size, or `fallback` when nothing usable is stored.
pub fn load_page_size(store: &dyn PreferenceStore, fallback: usize) -> usize {
    store
        .get(GRID_PREFS_KEY)
        .and_then(|v| serde_json::from_value::<GridPrefs>(v).ok())
        .map(|p| p.page_size)
        .filter(|size| *size > 0)
        .unwrap_or(fallback)
}

pub fn save_page_size(store: &dyn PreferenceStore, page_size: usize) -> Result<(), ClientError> {
    store.set(GRID_PREFS_KEY, serde_json::to_value(GridPrefs { page_size })?)
}

pub fn load_theme(store: &dyn PreferenceStore) -> ThemeMode {
    store
        .get(THEME_MODE_KEY)
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

pub fn save_theme(store: &dyn PreferenceStore, mode: ThemeMode) -> Result<(), ClientError> {
    store.set(THEME_MODE_KEY, serde_json::to_value(mode)?)
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), ClientError> {
        self.values
            .lock()
            .map_err(|e| ClientError::Preferences(format!("Preference lock poisoned: {}", e)))?
            .insert(key.to_string(), value);
        Ok(())
    }
}

/// All preferences in one JSON object file. A missing or corrupt file reads
/// as empty; writes replace the whole file.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: Mutex<HashMap<String, Value>>,
}

impl FilePreferenceStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = std::fs::read_to_string(&path)
            .ok()
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(values) => Some(values),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable preference file");
                    None
                }
            })
            .unwrap_or_default();
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// Opens `file_name` inside the per-user config directory.
    pub fn open_default(file_name: &str) -> Self {
        Self::open(default_dir().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn default_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), ClientError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| ClientError::Preferences(format!("Preference lock poisoned: {}", e)))?;
        let mut updated = values.clone();
        updated.insert(key.to_string(), value);

        // the cached map only changes once the file holds the new value
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&updated)?)?;
        *values = updated;
        tracing::debug!(path = %self.path.display(), key, "Preference saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_page_size_round_trip_in_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let store = FilePreferenceStore::open(&path);
        assert_eq!(load_page_size(&store, 10), 10);

        save_page_size(&store, 25).unwrap();
        let reopened = FilePreferenceStore::open(&path);
        assert_eq!(load_page_size(&reopened, 10), 25);
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"pageSize\": 25"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FilePreferenceStore::open(&path);
        assert_eq!(load_theme(&store), ThemeMode::Light);
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();
        let store = FilePreferenceStore::open(blocker.join("prefs.json"));

        assert!(save_theme(&store, ThemeMode::Dark).is_err());
        assert_eq!(store.get(THEME_MODE_KEY), None);
        assert_eq!(load_theme(&store), ThemeMode::Light);
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        let store = MemoryPreferenceStore::new();
        store.set(GRID_PREFS_KEY, json!({"pageSize": 0})).unwrap();
        assert_eq!(load_page_size(&store, 10), 10);
    }

    #[test]
    fn test_theme_round_trip() {
        let store = MemoryPreferenceStore::new();
        save_theme(&store, ThemeMode::Dark).unwrap();
        assert_eq!(store.get(THEME_MODE_KEY), Some(json!("dark")));
        assert_eq!(load_theme(&store).toggled(), ThemeMode::Light);
    }
}
