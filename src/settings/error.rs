// src/settings/error.rs

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum SettingsError {
    #[error("Failed to read settings: {reason}")]
    ReadFailed { reason: String },

    #[error("Failed to write settings: {reason}")]
    WriteFailed { reason: String },

    #[error("Malformed settings: {reason}")]
    Malformed { reason: String },

    #[error("Settings lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Malformed {
            reason: e.to_string(),
        }
    }
}
