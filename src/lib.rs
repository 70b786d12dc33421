pub mod actions;
pub mod config;
pub mod error;
pub mod notify;
pub mod settings;
pub mod transfer;
pub mod vault;

#[cfg(feature = "app")]
mod commands;
#[cfg(feature = "app")]
mod platform;

#[cfg(feature = "app")]
use std::sync::{Arc, Mutex};

#[cfg(feature = "app")]
use crate::{
    actions::ActionRegistry,
    settings::SettingsStore,
    transfer::{ExportEnvironment, TransferOperator},
};

#[cfg(feature = "app")]
pub struct AppState {
    pub transfer: TransferOperator,
    pub settings: SettingsStore,
    pub actions: ActionRegistry,
    pub export_env: Box<dyn ExportEnvironment>,
    /// Vault path of the file open in the editor
    pub active_file: Mutex<Option<String>>,
}

#[cfg(feature = "app")]
fn build_state(app_handle: &tauri::AppHandle) -> Result<AppState, Box<dyn std::error::Error>> {
    use tauri::path::BaseDirectory;
    use tauri::Manager;

    let fallback = app_handle
        .path()
        .resolve(config::VAULT_DIRECTORY, BaseDirectory::AppLocalData)?;
    let root = config::vault_root_from_env(fallback);
    let vault = vault::LocalVault::open(&root)?;
    tracing::info!(root = %root.display(), "vault opened");

    let settings = SettingsStore::new(Box::new(platform::TauriStoreBackend::new(
        app_handle.clone(),
    )));
    settings.load_or_default();

    let notifier = Arc::new(platform::TauriNotifier::new(app_handle.clone()));

    Ok(AppState {
        transfer: TransferOperator::new(Arc::new(vault), notifier),
        settings,
        actions: ActionRegistry::standard(),
        export_env: Box::new(platform::TauriExportEnvironment::new(app_handle.clone())),
        active_file: Mutex::new(None),
    })
}

#[cfg(feature = "app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    config::init_tracing();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_os::init())
        .plugin(tauri_plugin_store::Builder::new().build())
        .setup(|app| {
            let state = build_state(app.handle())?;
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::lfi_list_actions,
            commands::lfi_run_action,
            commands::lfi_import_local_files,
            commands::lfi_import_uploaded_files,
            commands::lfi_export_file,
            commands::lfi_set_active_file,
            commands::lfi_get_settings,
            commands::lfi_set_default_folder,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let tauri::RunEvent::Exit = event {
                if let Some(state) = app_handle.try_state::<AppState>() {
                    if let Err(e) = state.settings.save() {
                        tracing::error!(error = %e, "failed to save settings on exit");
                    }
                }
            }
        });
}
