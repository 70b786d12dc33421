// src/transfer/types.rs

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ts_rs::TS;

use super::error::TransferError;

// ============================================================================
// Import
// ============================================================================

/// Where the bytes of an external file come from
#[derive(Debug, Clone)]
pub enum ExternalContent {
    /// A file on the local disk, read when the import reaches it
    Path(PathBuf),
    /// Bytes already in memory
    Bytes(Vec<u8>),
    /// Base64 payload handed over by the webview
    Base64(String),
}

/// A file selected outside the vault
#[derive(Debug, Clone)]
pub struct ExternalFile {
    pub name: String,
    pub content: ExternalContent,
}

impl ExternalFile {
    pub fn new(name: impl Into<String>, content: ExternalContent) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Reference a file on disk; its name is the last path component.
    /// Bytes that are not UTF-8 become U+FFFD.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            content: ExternalContent::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(name, ExternalContent::Bytes(data))
    }

    /// Load the full content
    pub async fn read(&self) -> Result<Vec<u8>, TransferError> {
        match &self.content {
            ExternalContent::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|e| TransferError::SourceUnreadable {
                        name: self.name.clone(),
                        reason: e.to_string(),
                    })
            }
            ExternalContent::Bytes(data) => Ok(data.clone()),
            ExternalContent::Base64(encoded) => {
                STANDARD
                    .decode(encoded)
                    .map_err(|e| TransferError::SourceUnreadable {
                        name: self.name.clone(),
                        reason: format!("Invalid base64 data: {}", e),
                    })
            }
        }
    }
}

/// File handed over by the webview file input
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    /// Content as standard base64
    pub data: String,
}

impl From<UploadedFile> for ExternalFile {
    fn from(file: UploadedFile) -> Self {
        ExternalFile::new(file.name, ExternalContent::Base64(file.data))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ImportStatus {
    /// Written to `path`; `renamed` when the conflict prefix was applied
    Imported { path: String, renamed: bool },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// Name of the external file
    pub name: String,
    pub status: ImportStatus,
}

/// Per-file results of one import batch, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub folder: String,
    pub outcomes: Vec<ImportOutcome>,
}

impl ImportReport {
    pub fn imported(&self) -> impl Iterator<Item = &ImportOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ImportStatus::Imported { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &ImportOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ImportStatus::Failed { .. }))
    }
}

// ============================================================================
// Export
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ExportOutcome {
    /// Bytes written to a location picked by the user
    Downloaded {
        path: String,
        destination: String,
        size: u64,
        mime: String,
    },
    /// Handed to the platform's default application
    Delegated { path: String },
    /// The user dismissed the save prompt
    Cancelled { path: String },
}
