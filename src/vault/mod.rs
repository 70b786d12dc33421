// src/vault/mod.rs
//!
//! Vault Module
//!
//! The managed document store files are imported into and exported from.
//! Entries are addressed by normalized vault paths (see [`path`]).
//!

pub mod error;
pub mod local;
pub mod path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ts_rs::TS;

pub use error::VaultError;
pub use local::LocalVault;

/// Kind of an existing vault entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    File,
    Folder,
}

/// Storage the transfer operations run against.
///
/// Paths handed to these methods are already normalized.
#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Resolve an entry by path; `None` when nothing exists there.
    /// Anything occupying the name counts, dangling symlinks included.
    async fn entry(&self, path: &str) -> Result<Option<EntryKind>, VaultError>;

    /// Create a new binary file. Fails if any entry already occupies `path`.
    async fn create_binary(&self, path: &str, data: &[u8]) -> Result<(), VaultError>;

    /// Read the full content of a file entry
    async fn read_binary(&self, path: &str) -> Result<Vec<u8>, VaultError>;

    /// On-disk location of an entry, for handing it to other applications
    async fn locate(&self, path: &str) -> Option<PathBuf>;
}

/// Resolve `path` and require it to be a folder
pub async fn require_folder(store: &dyn VaultStore, path: &str) -> Result<String, VaultError> {
    let normalized = path::normalize_path(path)?;
    match store.entry(&normalized).await? {
        Some(EntryKind::Folder) => Ok(normalized),
        Some(EntryKind::File) => Err(VaultError::NotAFolder { path: normalized }),
        None => Err(VaultError::NotFound { path: normalized }),
    }
}

/// Resolve `path` and require it to be a file
pub async fn require_file(store: &dyn VaultStore, path: &str) -> Result<String, VaultError> {
    let normalized = path::normalize_path(path)?;
    match store.entry(&normalized).await? {
        Some(EntryKind::File) => Ok(normalized),
        Some(EntryKind::Folder) => Err(VaultError::NotAFile { path: normalized }),
        None => Err(VaultError::NotFound { path: normalized }),
    }
}
