// src/platform.rs
//!
//! Tauri-backed collaborators
//!
//! Notification sink, settings persistence, file picker and export side
//! effects on top of the dialog, notification, opener, os and store plugins.
//!

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tauri::{AppHandle, Emitter, Manager, Runtime};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_notification::NotificationExt;
use tauri_plugin_opener::OpenerExt;
use tauri_plugin_store::StoreExt;
use tokio::sync::oneshot;

use crate::config::SETTINGS_STORE;
use crate::notify::{Notice, NoticeKind, Notifier, NOTICE_EVENT};
use crate::settings::{SettingsBackend, SettingsError};
use crate::transfer::{ExportCapability, ExportEnvironment, ExternalFile, TransferError};

const APP_TITLE: &str = "Local File Interface";

// ============================================================================
// Notices
// ============================================================================

/// Forwards notices to the webview and the system notification center
pub struct TauriNotifier<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriNotifier<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> Notifier for TauriNotifier<R> {
    fn notify(&self, notice: Notice) {
        if let Err(e) = self.app.emit(NOTICE_EVENT, &notice) {
            tracing::warn!(error = %e, "failed to emit notice to webview");
        }

        let title = match notice.kind {
            NoticeKind::Success => APP_TITLE.to_string(),
            NoticeKind::Failure => format!("{} - error", APP_TITLE),
        };

        if let Err(e) = self
            .app
            .notification()
            .builder()
            .title(title)
            .body(&notice.message)
            .show()
        {
            tracing::warn!(error = %e, "failed to show notification");
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Settings record kept in the store plugin's `settings.json`
pub struct TauriStoreBackend<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriStoreBackend<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> SettingsBackend for TauriStoreBackend<R> {
    fn load_raw(&self) -> Result<Option<Value>, SettingsError> {
        let store = self
            .app
            .store(SETTINGS_STORE)
            .map_err(|e| SettingsError::ReadFailed {
                reason: e.to_string(),
            })?;

        if store.is_empty() {
            return Ok(None);
        }

        let record: Map<String, Value> = store.entries().into_iter().collect();
        Ok(Some(Value::Object(record)))
    }

    fn save_raw(&self, record: &Map<String, Value>) -> Result<(), SettingsError> {
        let store = self
            .app
            .store(SETTINGS_STORE)
            .map_err(|e| SettingsError::WriteFailed {
                reason: e.to_string(),
            })?;

        store.clear();
        for (key, value) in record {
            store.set(key.clone(), value.clone());
        }

        store.save().map_err(|e| SettingsError::WriteFailed {
            reason: e.to_string(),
        })
    }
}

// ============================================================================
// File picker
// ============================================================================

/// Let the user pick files to import; empty when the dialog is dismissed
pub async fn pick_external_files<R: Runtime>(app: &AppHandle<R>) -> Vec<ExternalFile> {
    let (tx, rx) = oneshot::channel();

    app.dialog()
        .file()
        .set_title("Import local files")
        .pick_files(move |picked| {
            let _ = tx.send(picked);
        });

    let picked = rx.await.ok().flatten().unwrap_or_default();

    picked
        .into_iter()
        .filter_map(|file_path| match file_path.into_path() {
            Ok(path) => Some(ExternalFile::from_path(path)),
            Err(e) => {
                tracing::warn!(error = %e, "skipping picked file without a local path");
                None
            }
        })
        .collect()
}

// ============================================================================
// Export
// ============================================================================

pub struct TauriExportEnvironment<R: Runtime> {
    app: AppHandle<R>,
    capability: ExportCapability,
}

impl<R: Runtime> TauriExportEnvironment<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        let capability = ExportCapability::for_platform(tauri_plugin_os::platform());
        tracing::info!(?capability, "export capability detected");
        Self { app, capability }
    }
}

#[async_trait]
impl<R: Runtime> ExportEnvironment for TauriExportEnvironment<R> {
    fn capability(&self) -> ExportCapability {
        self.capability
    }

    async fn choose_destination(&self, suggested_name: &str) -> Option<PathBuf> {
        let (tx, rx) = oneshot::channel();

        let mut dialog = self
            .app
            .dialog()
            .file()
            .set_title("Export out of the vault")
            .set_file_name(suggested_name);

        if let Ok(downloads) = self.app.path().download_dir() {
            dialog = dialog.set_directory(downloads);
        }

        dialog.save_file(move |chosen| {
            let _ = tx.send(chosen);
        });

        let chosen = rx.await.ok().flatten()?;
        match chosen.into_path() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "save location is not a local path");
                None
            }
        }
    }

    async fn open_with_default_app(&self, location: &Path) -> Result<(), TransferError> {
        self.app
            .opener()
            .open_path(location.to_string_lossy().to_string(), None::<&str>)
            .map_err(|e| TransferError::HandoffFailed {
                reason: e.to_string(),
            })
    }
}
