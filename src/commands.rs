// src/commands.rs
//!
//! Tauri commands invoked by the webview
//!

use serde::Serialize;
use tauri::{AppHandle, State};
use ts_rs::TS;

use crate::actions::{self, ActionDescriptor, ActionId, Invocation};
use crate::error::CommandError;
use crate::platform;
use crate::settings::Settings;
use crate::transfer::{ExportOutcome, ExternalFile, ImportReport, UploadedFile};
use crate::vault::path::normalize_path;
use crate::AppState;

/// Result of running an action
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "result", rename_all = "camelCase")]
pub enum ActionResult {
    Imported(ImportReport),
    Exported(ExportOutcome),
    Noop,
}

fn active_file(state: &AppState) -> Result<Option<String>, CommandError> {
    state
        .active_file
        .lock()
        .map(|active| active.clone())
        .map_err(|_| CommandError::Internal {
            reason: "Failed to lock active file".to_string(),
        })
}

async fn import_with_picker(
    app_handle: &AppHandle,
    state: &AppState,
    folder: &str,
) -> Result<ImportReport, CommandError> {
    // Configuration errors abort before the picker opens
    let folder = state.transfer.resolve_import_folder(folder).await?;

    let files = platform::pick_external_files(app_handle).await;
    if files.is_empty() {
        tracing::debug!(folder = %folder, "import dismissed");
    }

    Ok(state.transfer.import_resolved(folder, files).await)
}

async fn run_invocation(
    app_handle: &AppHandle,
    state: &AppState,
    invocation: Invocation,
) -> Result<ActionResult, CommandError> {
    match invocation {
        Invocation::Import { folder } => Ok(ActionResult::Imported(
            import_with_picker(app_handle, state, &folder).await?,
        )),
        Invocation::Export { path } => Ok(ActionResult::Exported(
            state
                .transfer
                .export(&path, state.export_env.as_ref())
                .await?,
        )),
        Invocation::Noop => Ok(ActionResult::Noop),
    }
}

/// Actions for a right-clicked entry, or the command palette without one
#[tauri::command]
pub async fn lfi_list_actions(
    state: State<'_, AppState>,
    entry_path: Option<String>,
) -> Result<Vec<ActionDescriptor>, CommandError> {
    let Some(entry_path) = entry_path else {
        return Ok(state.actions.for_entry(None));
    };

    let normalized = normalize_path(&entry_path)?;
    match state.transfer.store().entry(&normalized).await? {
        Some(kind) => Ok(state.actions.for_entry(Some(kind))),
        None => Ok(Vec::new()),
    }
}

/// Run an action from a menu (`context` = clicked entry) or the palette
#[tauri::command]
pub async fn lfi_run_action(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    id: ActionId,
    context: Option<String>,
) -> Result<ActionResult, CommandError> {
    let default_folder = state.settings.get()?.folder;
    let active = active_file(&state)?;

    let invocation = actions::resolve(id, context.as_deref(), &default_folder, active.as_deref());
    tracing::debug!(?id, ?invocation, "running action");

    run_invocation(&app_handle, &state, invocation).await
}

/// Pick local files and import them into `folder` (default: configured folder)
#[tauri::command]
pub async fn lfi_import_local_files(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    folder: Option<String>,
) -> Result<ImportReport, CommandError> {
    let folder = match folder {
        Some(folder) => folder,
        None => state.settings.get()?.folder,
    };

    import_with_picker(&app_handle, &state, &folder).await
}

/// Import files the webview read itself (drag and drop, file input)
#[tauri::command]
pub async fn lfi_import_uploaded_files(
    state: State<'_, AppState>,
    folder: Option<String>,
    files: Vec<UploadedFile>,
) -> Result<ImportReport, CommandError> {
    let folder = match folder {
        Some(folder) => folder,
        None => state.settings.get()?.folder,
    };

    let files: Vec<ExternalFile> = files.into_iter().map(Into::into).collect();
    Ok(state.transfer.import(&folder, files).await?)
}

/// Export `path`, or the active file. `None` when there is nothing to export.
#[tauri::command]
pub async fn lfi_export_file(
    state: State<'_, AppState>,
    path: Option<String>,
) -> Result<Option<ExportOutcome>, CommandError> {
    let Some(path) = path.or(active_file(&state)?) else {
        return Ok(None);
    };

    let outcome = state
        .transfer
        .export(&path, state.export_env.as_ref())
        .await?;
    Ok(Some(outcome))
}

/// Track the file open in the editor
#[tauri::command]
pub fn lfi_set_active_file(
    state: State<'_, AppState>,
    path: Option<String>,
) -> Result<(), CommandError> {
    let mut active = state
        .active_file
        .lock()
        .map_err(|_| CommandError::Internal {
            reason: "Failed to lock active file".to_string(),
        })?;
    *active = path;
    Ok(())
}

#[tauri::command]
pub fn lfi_get_settings(state: State<'_, AppState>) -> Result<Settings, CommandError> {
    Ok(state.settings.get()?)
}

/// Bound to the settings panel's folder field; persisted on every change
#[tauri::command]
pub fn lfi_set_default_folder(
    state: State<'_, AppState>,
    folder: String,
) -> Result<Settings, CommandError> {
    state.settings.set_folder(folder)?;
    Ok(state.settings.get()?)
}
