// src/error.rs
//!
//! Errors returned by the Tauri commands
//!

use serde::Serialize;
use thiserror::Error;

use crate::settings::SettingsError;
use crate::transfer::TransferError;
use crate::vault::VaultError;

#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum CommandError {
    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("Internal error: {reason}")]
    Internal { reason: String },
}
