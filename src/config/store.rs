//! The persistent settings store.
//!
//! Windows and the registry only see the [`SettingsStore`] get/set contract.
//! Values are plain `serde_json::Value`s under string keys; the typed helpers
//! at the bottom of this module do the (de)serialization.

use super::persistence::{get_settings_file_path, load_values, save_values};
use super::Preferences;
use crate::error::{Result, ResultExt};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Keys used in the settings store.
pub mod keys {
    /// Serialized [`crate::config::WindowGeometry`] of the last closed window.
    pub const GEOMETRY: &str = "geometry";
    /// Serialized [`crate::config::WindowLayout`] of the last closed window.
    pub const WINDOW_STATE: &str = "windowState";
    /// Recently opened files, most recent first.
    pub const RECENT_FILES: &str = "recentFiles";
    /// Serialized [`crate::config::Preferences`].
    pub const PREFERENCES: &str = "preferences";
}

/// Key/value persistence shared by every window.
///
/// Access is serialized by the UI thread, so implementations need no locking.
pub trait SettingsStore {
    /// Current value under `key`, if any.
    fn value(&self, key: &str) -> Option<Value>;

    /// Replace the value under `key`. Persistent implementations write
    /// through immediately.
    fn set_value(&mut self, key: &str, value: Value) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON file store
// ─────────────────────────────────────────────────────────────────────────────

/// Store backed by a JSON object on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at the default platform location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(get_settings_file_path()?))
    }

    /// Open the store at `path`.
    ///
    /// A corrupted file is logged and replaced on the next write rather than
    /// failing startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load_values(&path).unwrap_or_warn_default(Map::new(), "Failed to load settings");
        info!("Settings store opened at {}", path.display());
        Self { path, values }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        save_values(&self.path, &self.values)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// Store that lives only as long as the process.
///
/// Used when no configuration directory is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: Map<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Read and deserialize the value under `key`.
///
/// Missing keys and values of the wrong shape both yield `None`; the latter
/// is logged.
pub fn read_value<T: DeserializeOwned>(store: &dyn SettingsStore, key: &str) -> Option<T> {
    let value = store.value(key)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("Ignoring malformed setting '{}': {}", key, e);
            None
        }
    }
}

/// Current user preferences, sanitized. Defaults if absent or malformed.
pub fn load_preferences(store: &dyn SettingsStore) -> Preferences {
    let Some(value) = store.value(keys::PREFERENCES) else {
        return Preferences::default();
    };
    Preferences::from_value_sanitized(value).unwrap_or_else(|e| {
        warn!("Ignoring malformed preferences: {}", e);
        Preferences::default()
    })
}

/// Serialize `value` and store it under `key`.
pub fn write_value<T: Serialize>(store: &mut dyn SettingsStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_value(value)?;
    debug!("Writing setting '{}'", key);
    store.set_value(key, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{WindowGeometry, WindowLayout};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert!(store.value("missing").is_none());
        store.set_value("k", json!(3)).unwrap();
        assert_eq!(store.value("k"), Some(json!(3)));
    }

    #[test]
    fn test_json_store_writes_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = JsonFileStore::open(&path);
        store
            .set_value(keys::RECENT_FILES, json!(["/x.pdf"]))
            .unwrap();

        // A second store reading the same file sees the value immediately.
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.value(keys::RECENT_FILES), Some(json!(["/x.pdf"])));
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_json_store_recovers_from_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json at all").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert!(store.value(keys::GEOMETRY).is_none());

        store.set_value(keys::GEOMETRY, json!({ "width": 300.0, "height": 300.0 })).unwrap();
        let reopened = JsonFileStore::open(&path);
        assert!(reopened.value(keys::GEOMETRY).is_some());
    }

    #[test]
    fn test_typed_roundtrip_is_exact() {
        let mut store = MemoryStore::new();
        let geometry = WindowGeometry {
            width: 812.5,
            height: 640.25,
            x: Some(33.0),
            y: Some(-12.0),
            maximized: true,
        };
        let layout = WindowLayout {
            show_toolbar: false,
            show_status_bar: true,
        };
        write_value(&mut store, keys::GEOMETRY, &geometry).unwrap();
        write_value(&mut store, keys::WINDOW_STATE, &layout).unwrap();

        assert_eq!(read_value::<WindowGeometry>(&store, keys::GEOMETRY), Some(geometry));
        assert_eq!(read_value::<WindowLayout>(&store, keys::WINDOW_STATE), Some(layout));
    }

    #[test]
    fn test_load_preferences_defaults_and_sanitizes() {
        let mut store = MemoryStore::new();
        assert_eq!(load_preferences(&store), Preferences::default());

        store
            .set_value(keys::PREFERENCES, json!({ "theme": "dark", "zoom_step": 0 }))
            .unwrap();
        let prefs = load_preferences(&store);
        assert_eq!(prefs.theme, crate::config::Theme::Dark);
        assert_eq!(prefs.zoom_step, Preferences::MIN_ZOOM_STEP);

        store.set_value(keys::PREFERENCES, json!(17)).unwrap();
        assert_eq!(load_preferences(&store), Preferences::default());
    }

    #[test]
    fn test_read_value_malformed_is_none() {
        let mut store = MemoryStore::new();
        store.set_value(keys::GEOMETRY, json!("definitely not geometry")).unwrap();
        assert!(read_value::<WindowGeometry>(&store, keys::GEOMETRY).is_none());
    }
}
