//! JSON documents on local disk
//!
//! Settings, the session and snapshots are each a single pretty-printed
//! JSON document. Saves are staged in a sibling `.tmp` file that is synced
//! and then renamed over the target, so readers see the old document or
//! the new one and nothing in between.

use std::ffi::OsString;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{PulseError, PulseResult};

/// Load a document, or `None` when nothing exists at `path`
pub fn load_json<T: DeserializeOwned>(path: &Path) -> PulseResult<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error("open", path, e)),
    };
    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| storage_error("parse", path, e))
}

/// Load a document that has to be there
pub fn load_json_required<T: DeserializeOwned>(path: &Path) -> PulseResult<T> {
    load_json(path)?
        .ok_or_else(|| PulseError::Storage(format!("File not found: {}", path.display())))
}

/// Replace the document at `path`, creating missing parent directories
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> PulseResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create the directory of", path, e))?;
    }

    let staging = staging_path(path);
    let saved = write_synced(&staging, value)
        .and_then(|()| fs::rename(&staging, path).map_err(|e| storage_error("replace", path, e)));
    if saved.is_err() {
        let _ = fs::remove_file(&staging);
    }
    saved
}

/// Remove a file; returns whether there was one
pub fn delete_file(path: &Path) -> PulseResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(storage_error("remove", path, e)),
    }
}

/// `cache.json` is staged as `cache.json.tmp` in the same directory
fn staging_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced<T: Serialize>(path: &Path, value: &T) -> PulseResult<()> {
    let file = File::create(path).map_err(|e| storage_error("create", path, e))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value).map_err(|e| storage_error("write", path, e))?;
    let file = out
        .into_inner()
        .map_err(|e| storage_error("flush", path, e.into_error()))?;
    file.sync_all().map_err(|e| storage_error("sync", path, e))
}

fn storage_error(action: &str, path: &Path, cause: impl Display) -> PulseError {
    PulseError::Storage(format!("Failed to {} {}: {}", action, path.display(), cause))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Cached {
        label: String,
        count: i32,
    }

    fn sample() -> Cached {
        Cached {
            label: "budgets".to_string(),
            count: 7,
        }
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: Option<Cached> = load_json(&path).unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn test_save_then_load_leaves_no_staging_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");

        save_json(&path, &sample()).unwrap();
        let loaded: Option<Cached> = load_json(&path).unwrap();
        assert_eq!(loaded, Some(sample()));
        assert!(!temp_dir.path().join("cache.json.tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("cache.json");

        save_json(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_replaces_existing_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        fs::write(&path, "stale").unwrap();

        save_json(&path, &sample()).unwrap();
        assert_eq!(load_json_required::<Cached>(&path).unwrap(), sample());
    }

    #[test]
    fn test_required_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");

        let err = load_json_required::<Cached>(&path).unwrap_err();
        assert!(err.to_string().contains("File not found"));

        save_json(&path, &sample()).unwrap();
        assert_eq!(load_json_required::<Cached>(&path).unwrap(), sample());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        fs::write(&path, "not json at all").unwrap();

        let err = load_json::<Cached>(&path).unwrap_err();
        assert!(matches!(err, PulseError::Storage(ref msg) if msg.starts_with("Failed to parse")));
    }

    #[test]
    fn test_delete_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        assert!(!delete_file(&path).unwrap());
        fs::write(&path, "{}").unwrap();
        assert!(delete_file(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_staging_path() {
        assert_eq!(
            staging_path(Path::new("/data/snapshot.json")),
            PathBuf::from("/data/snapshot.json.tmp")
        );
    }
}
