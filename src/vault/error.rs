// src/vault/error.rs
//!
//! Vault Error Types
//!

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum VaultError {
    #[error("Entry not found: {path}")]
    NotFound { path: String },

    #[error("Entry already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Not a folder: {path}")]
    NotAFolder { path: String },

    #[error("Not a file: {path}")]
    NotAFile { path: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid file name: '{name}'")]
    InvalidName { name: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("I/O error on '{path}': {reason}")]
    Io { path: String, reason: String },
}

impl VaultError {
    /// Map an I/O error raised while touching `path`
    pub fn from_io(path: &str, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => VaultError::NotFound {
                path: path.to_string(),
            },
            std::io::ErrorKind::AlreadyExists => VaultError::AlreadyExists {
                path: path.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => VaultError::PermissionDenied {
                path: path.to_string(),
            },
            _ => VaultError::Io {
                path: path.to_string(),
                reason: e.to_string(),
            },
        }
    }
}
