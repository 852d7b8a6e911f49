//! Generic storage helpers
//!
//! JSON files under the platform config directory. Load and save work on
//! explicit paths so callers (and tests) control exactly which slot they
//! touch.

use crate::config;
use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The application config directory (not guaranteed to exist yet)
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(config::app::NAME))
        .ok_or_else(|| {
            AppError::Config(
                "Could not determine config directory. HOME environment variable may not be set."
                    .to_string(),
            )
        })
}

/// Full path of a data file inside the config directory
pub fn data_path(file_name: &str) -> Result<PathBuf> {
    Ok(config_dir()?.join(file_name))
}

fn create_dir_if_needed(path: &Path) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(AppError::Storage(format!(
            "Permission denied creating directory {:?}",
            path
        ))),
        Err(e) => Err(AppError::Storage(format!(
            "Failed to create directory {:?}: {}",
            path, e
        ))),
    }
}

fn read_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(AppError::Storage(format!(
            "Permission denied reading {:?}",
            path
        ))),
        Err(e) => Err(AppError::Storage(format!(
            "Failed to read {:?}: {}",
            path, e
        ))),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    match fs::write(path, content) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(AppError::Storage(format!(
            "Permission denied writing {:?}",
            path
        ))),
        Err(e) => Err(AppError::Storage(format!(
            "Failed to write {:?}: {}",
            path, e
        ))),
    }
}

/// Load a JSON value from a file
///
/// Returns `Ok(None)` when the file does not exist or is empty; a file
/// that exists but fails to parse is an error, and the caller decides
/// whether that is fatal.
pub fn load_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let Some(content) = read_file(path)? else {
        return Ok(None);
    };
    if content.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(&content) {
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(AppError::Storage(format!(
            "Failed to parse {:?}: {}",
            path, e
        ))),
    }
}

/// Save a value to a file as pretty-printed JSON
///
/// Creates parent directories as needed.
pub fn save_to<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_if_needed(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Storage(format!("Failed to serialize data: {}", e)))?;
    write_file(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::env::temp_dir;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        temp_dir().join(format!("quotidian_test_{}_{}.json", id, name))
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let data = TestData {
            name: "hello".to_string(),
            value: 42,
        };

        save_to(&path, &data).unwrap();
        let loaded: Option<TestData> = load_from(&path).unwrap();
        assert_eq!(loaded, Some(data));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_nonexistent() {
        let path = temp_path("missing");
        let loaded: Option<TestData> = load_from(&path).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_load_empty_file() {
        let path = temp_path("empty");
        fs::write(&path, "").unwrap();

        let loaded: Option<TestData> = load_from(&path).unwrap();
        assert_eq!(loaded, None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_whitespace_file() {
        let path = temp_path("whitespace");
        fs::write(&path, "  \n\t ").unwrap();

        let loaded: Option<TestData> = load_from(&path).unwrap();
        assert_eq!(loaded, None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_path("invalid");
        fs::write(&path, "not json at all").unwrap();

        let result: Result<Option<TestData>> = load_from(&path);
        assert!(result.is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = temp_path("nested_dir");
        let path = dir.join("deep").join("data.json");
        let data = TestData {
            name: "nested".to_string(),
            value: 1,
        };

        save_to(&path, &data).unwrap();
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_error_message_contains_path() {
        let path = temp_path("badparse");
        fs::write(&path, "{broken").unwrap();

        let err = load_from::<TestData>(&path).unwrap_err();
        assert!(err.to_string().contains("badparse"));

        let _ = fs::remove_file(&path);
    }
}
