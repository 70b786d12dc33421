// src/transfer/export.rs
//!
//! Export side effects
//!
//! Where the environment can take a download, the bytes are written to a
//! user-chosen location. Elsewhere the file is handed to the platform's default
//! application instead.
//!

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use ts_rs::TS;

use super::error::TransferError;

/// How the environment accepts exported files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ExportCapability {
    DirectDownload,
    DefaultHandler,
}

impl ExportCapability {
    /// Desktop platforms take downloads, mobile ones delegate
    pub fn for_platform(platform: &str) -> Self {
        match platform {
            "android" | "ios" => ExportCapability::DefaultHandler,
            _ => ExportCapability::DirectDownload,
        }
    }
}

#[async_trait]
pub trait ExportEnvironment: Send + Sync {
    fn capability(&self) -> ExportCapability;

    /// Ask where a download named `suggested_name` should go; `None` if dismissed
    async fn choose_destination(&self, suggested_name: &str) -> Option<PathBuf>;

    /// Open `location` with the platform's default application
    async fn open_with_default_app(&self, location: &Path) -> Result<(), TransferError>;
}

/// Write `data` to `destination`.
///
/// The bytes are staged in a temporary file next to the destination and moved
/// into place once complete. The staged file is removed on every failure path.
pub async fn deliver_download(destination: PathBuf, data: Vec<u8>) -> Result<u64, TransferError> {
    tokio::task::spawn_blocking(move || stage_and_persist(&destination, &data))
        .await
        .map_err(|e| TransferError::Internal {
            reason: format!("Download task failed: {}", e),
        })?
}

fn stage_and_persist(destination: &Path, data: &[u8]) -> Result<u64, TransferError> {
    let delivery_error = |reason: String| TransferError::DeliveryFailed {
        destination: destination.to_string_lossy().to_string(),
        reason,
    };

    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staged = tempfile::Builder::new()
        .prefix(".lfi-export-")
        .tempfile_in(dir)
        .map_err(|e| delivery_error(format!("Failed to stage download: {}", e)))?;

    staged
        .write_all(data)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| delivery_error(e.to_string()))?;

    staged
        .persist(destination)
        .map_err(|e| delivery_error(e.error.to_string()))?;

    Ok(data.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_capability_for_platform() {
        assert_eq!(ExportCapability::for_platform("linux"), ExportCapability::DirectDownload);
        assert_eq!(ExportCapability::for_platform("windows"), ExportCapability::DirectDownload);
        assert_eq!(ExportCapability::for_platform("macos"), ExportCapability::DirectDownload);
        assert_eq!(ExportCapability::for_platform("android"), ExportCapability::DefaultHandler);
        assert_eq!(ExportCapability::for_platform("ios"), ExportCapability::DefaultHandler);
    }

    #[tokio::test]
    async fn test_deliver_download_writes_bytes() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("out.bin");

        let size = deliver_download(destination.clone(), vec![9, 8, 7]).await.unwrap();

        assert_eq!(size, 3);
        assert_eq!(std::fs::read(&destination).unwrap(), vec![9, 8, 7]);
        // Only the delivered file remains, no staging leftovers
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_deliver_download_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("missing").join("out.bin");

        let err = deliver_download(destination, vec![1]).await.unwrap_err();

        assert!(matches!(err, TransferError::DeliveryFailed { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
