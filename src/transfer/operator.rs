// src/transfer/operator.rs
//!
//! Import into and export out of the vault
//!

use std::sync::Arc;

use super::conflict::{self, Clock};
use super::error::TransferError;
use super::export::{deliver_download, ExportCapability, ExportEnvironment};
use super::types::{ExportOutcome, ExternalFile, ImportOutcome, ImportReport, ImportStatus};
use crate::notify::{Notice, Notifier};
use crate::vault::{self, path, VaultStore};

pub struct TransferOperator {
    store: Arc<dyn VaultStore>,
    notifier: Arc<dyn Notifier>,
    clock: Clock,
}

impl TransferOperator {
    pub fn new(store: Arc<dyn VaultStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            clock: conflict::system_clock(),
        }
    }

    /// Replace the clock used for conflict timestamps
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &Arc<dyn VaultStore> {
        &self.store
    }

    /// Check that `folder` is an existing vault folder.
    ///
    /// Reports the failure to the user, so callers can simply abort.
    pub async fn resolve_import_folder(&self, folder: &str) -> Result<String, TransferError> {
        match vault::require_folder(self.store.as_ref(), folder).await {
            Ok(normalized) => Ok(normalized),
            Err(e) => {
                tracing::error!(folder = %folder, error = %e, "import folder unavailable");
                self.notifier
                    .notify(Notice::failure(format!("{} is not a folder", folder)));
                Err(TransferError::FolderUnavailable {
                    path: folder.to_string(),
                })
            }
        }
    }

    /// Import `files` into `folder`, one after another.
    ///
    /// A failing file is reported and skipped; the rest of the batch still
    /// runs. An empty batch touches nothing and raises no notice.
    pub async fn import(
        &self,
        folder: &str,
        files: Vec<ExternalFile>,
    ) -> Result<ImportReport, TransferError> {
        if files.is_empty() {
            return Ok(ImportReport {
                folder: folder.to_string(),
                outcomes: Vec::new(),
            });
        }

        let folder = self.resolve_import_folder(folder).await?;
        Ok(self.import_resolved(folder, files).await)
    }

    /// Import into a folder already returned by [`Self::resolve_import_folder`]
    pub async fn import_resolved(&self, folder: String, files: Vec<ExternalFile>) -> ImportReport {
        let mut outcomes = Vec::with_capacity(files.len());

        for file in files {
            outcomes.push(self.import_one(&folder, file).await);
        }

        ImportReport { folder, outcomes }
    }

    async fn import_one(&self, folder: &str, file: ExternalFile) -> ImportOutcome {
        match self.write_into(folder, &file).await {
            Ok(target) => {
                tracing::info!(
                    name = %file.name,
                    path = %target.path,
                    renamed = target.renamed,
                    "file imported"
                );
                self.notifier
                    .notify(Notice::success(format!("{} imported!", file.name)));
                ImportOutcome {
                    name: file.name,
                    status: ImportStatus::Imported {
                        path: target.path,
                        renamed: target.renamed,
                    },
                }
            }
            Err(e) => {
                tracing::warn!(name = %file.name, folder = %folder, error = %e, "import failed");
                self.notifier
                    .notify(Notice::failure(format!("Failed to import {}", file.name)));
                ImportOutcome {
                    name: file.name,
                    status: ImportStatus::Failed {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    async fn write_into(
        &self,
        folder: &str,
        file: &ExternalFile,
    ) -> Result<conflict::ResolvedTarget, TransferError> {
        path::validate_entry_name(&file.name)?;
        let data = file.read().await?;

        let target =
            conflict::resolve_target(self.store.as_ref(), folder, &file.name, (self.clock)())
                .await?;

        self.store.create_binary(&target.path, &data).await?;
        Ok(target)
    }

    /// Export the vault file at `file_path` through `env`.
    ///
    /// The content is always read first, so a missing or unreadable entry fails
    /// the same way on every platform.
    pub async fn export(
        &self,
        file_path: &str,
        env: &dyn ExportEnvironment,
    ) -> Result<ExportOutcome, TransferError> {
        let result = self.export_inner(file_path, env).await;

        if let Err(e) = &result {
            tracing::error!(path = %file_path, error = %e, "export failed");
            let name = path::file_name(file_path.trim_end_matches('/'));
            let name = if name.is_empty() { file_path } else { name };
            self.notifier
                .notify(Notice::failure(format!("Failed to export {}", name)));
        }

        result
    }

    async fn export_inner(
        &self,
        file_path: &str,
        env: &dyn ExportEnvironment,
    ) -> Result<ExportOutcome, TransferError> {
        let normalized = vault::require_file(self.store.as_ref(), file_path).await?;
        let data = self.store.read_binary(&normalized).await?;
        let name = path::file_name(&normalized).to_string();

        match env.capability() {
            ExportCapability::DirectDownload => {
                let Some(destination) = env.choose_destination(&name).await else {
                    tracing::info!(path = %normalized, "export cancelled");
                    return Ok(ExportOutcome::Cancelled { path: normalized });
                };

                let mime = mime_guess::from_path(&name)
                    .first_or_octet_stream()
                    .to_string();
                let size = deliver_download(destination.clone(), data).await?;

                tracing::info!(
                    path = %normalized,
                    destination = %destination.display(),
                    size,
                    "file exported"
                );
                self.notifier
                    .notify(Notice::success(format!("{} exported!", name)));

                Ok(ExportOutcome::Downloaded {
                    path: normalized,
                    destination: destination.to_string_lossy().to_string(),
                    size,
                    mime,
                })
            }
            ExportCapability::DefaultHandler => {
                let location = self.store.locate(&normalized).await.ok_or_else(|| {
                    TransferError::ExportFailed {
                        path: normalized.clone(),
                        reason: "entry has no location on disk".to_string(),
                    }
                })?;

                env.open_with_default_app(&location).await?;
                tracing::info!(path = %normalized, "file handed to default application");

                Ok(ExportOutcome::Delegated { path: normalized })
            }
        }
    }
}
