// src/transfer/error.rs
//!
//! Transfer Error Types
//!

use serde::Serialize;
use thiserror::Error;

use crate::vault::VaultError;

#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum TransferError {
    #[error("{path} is not a folder")]
    FolderUnavailable { path: String },

    #[error("Failed to read '{name}': {reason}")]
    SourceUnreadable { name: String, reason: String },

    #[error("Failed to export '{path}': {reason}")]
    ExportFailed { path: String, reason: String },

    #[error("Failed to deliver download to '{destination}': {reason}")]
    DeliveryFailed { destination: String, reason: String },

    #[error("Default application handoff failed: {reason}")]
    HandoffFailed { reason: String },

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("Internal error: {reason}")]
    Internal { reason: String },
}
