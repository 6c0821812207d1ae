//! Settings file persistence for Folio
//!
//! Reads and writes the key/value map behind [`super::JsonFileStore`] in the
//! platform configuration directory, using a backup-then-rename write so a
//! crash mid-save never leaves a truncated file behind.

use crate::error::{Error, Result};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "folio";

/// Settings file name
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Extension of the temporary file written before the final rename
const BACKUP_EXTENSION: &str = "json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\folio\`
/// - **macOS**: `~/Library/Application Support/folio/`
/// - **Linux**: `~/.config/folio/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the settings file.
pub fn get_settings_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(SETTINGS_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load
// ─────────────────────────────────────────────────────────────────────────────

/// Read the stored key/value map from `path`.
///
/// A missing or empty file yields an empty map. A file that is not a JSON
/// object is reported as `Error::ConfigParse`.
pub fn load_values(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        debug!("Settings file not found at {}, starting empty", path.display());
        return Ok(Map::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Settings file is empty, starting empty");
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&contents)? {
        Value::Object(map) => {
            debug!("Loaded {} setting(s) from {}", map.len(), path.display());
            Ok(map)
        }
        other => {
            warn!(
                "Settings file at {} is not a JSON object (found {})",
                path.display(),
                json_kind(&other)
            );
            Err(Error::ConfigParse {
                message: format!("expected a JSON object, found {}", json_kind(&other)),
                source: None,
            })
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Save
// ─────────────────────────────────────────────────────────────────────────────

/// Write the key/value map to `path` atomically.
///
/// The parent directory is created if needed. The JSON is written to a
/// sibling backup file first, then renamed over the target.
pub fn save_values(path: &Path, values: &Map<String, Value>) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            debug!("Creating config directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| Error::ConfigSave {
                path: dir.to_path_buf(),
                source: Box::new(e),
            })?;
        }
    }

    let json = serde_json::to_string_pretty(values).map_err(|e| Error::ConfigSave {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let backup_path = path.with_extension(BACKUP_EXTENSION);
    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, path).map_err(|e| Error::ConfigSave {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    debug!("Settings saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_get_config_dir_contains_app_name() {
        if let Ok(path) = get_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn test_get_settings_file_path() {
        if let Ok(path) = get_settings_file_path() {
            assert!(path.to_string_lossy().ends_with(SETTINGS_FILE_NAME));
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let values = load_values(&dir.path().join("settings.json")).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_load_empty_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "   \n").unwrap();
        assert!(load_values(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_corrupted_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ invalid json }").unwrap();
        assert!(matches!(load_values(&path), Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_load_non_object_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let err = load_values(&path).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_save_creates_directory_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut values = Map::new();
        values.insert("recentFiles".to_string(), json!(["/a.pdf", "/b.pdf"]));
        values.insert("geometry".to_string(), json!({ "width": 640.0, "height": 480.0 }));

        save_values(&path, &values).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension(BACKUP_EXTENSION).exists());

        let loaded = load_values(&path).unwrap();
        assert_eq!(loaded, values);
    }
}
