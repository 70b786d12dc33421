// src/settings/backend.rs
//!
//! Where the settings record is persisted
//!

use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::SettingsError;

/// Persistence for the raw settings record
pub trait SettingsBackend: Send + Sync {
    /// The persisted record, `None` when nothing was saved yet
    fn load_raw(&self) -> Result<Option<Value>, SettingsError>;

    /// Replace the persisted record with `record`
    fn save_raw(&self, record: &Map<String, Value>) -> Result<(), SettingsError>;
}

/// Settings kept in a standalone JSON file
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsBackend for JsonFileBackend {
    fn load_raw(&self) -> Result<Option<Value>, SettingsError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SettingsError::ReadFailed {
                    reason: format!("'{}': {}", self.path.display(), e),
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save_raw(&self, record: &Map<String, Value>) -> Result<(), SettingsError> {
        let write_error = |e: std::io::Error| SettingsError::WriteFailed {
            reason: format!("'{}': {}", self.path.display(), e),
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(write_error)?;

        let json = serde_json::to_string_pretty(record)?;

        // Written aside, then renamed over the old record
        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
        staged.write_all(json.as_bytes()).map_err(write_error)?;
        staged
            .persist(&self.path)
            .map_err(|e| write_error(e.error))?;

        Ok(())
    }
}
