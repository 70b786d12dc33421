// src/settings/mod.rs
//!
//! Settings Module
//!
//! One persisted record, `{ "folder": "<default import folder>" }`. Missing
//! keys fall back to defaults; every change is written through immediately.
//!

pub mod backend;
pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub use backend::{JsonFileBackend, SettingsBackend};
pub use error::SettingsError;
pub use store::SettingsStore;

/// Folder imports land in when no folder is given
pub const DEFAULT_FOLDER: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Default location for imported items
    pub folder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            folder: DEFAULT_FOLDER.to_string(),
        }
    }
}
