// src/vault/local.rs
//!
//! Vault backed by a directory on the local disk
//!

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use super::error::VaultError;
use super::path::{self, ROOT};
use super::{EntryKind, VaultStore};

pub struct LocalVault {
    root: PathBuf,
}

impl LocalVault {
    /// Open a vault rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| VaultError::from_io(&root.to_string_lossy(), e))?;

        if !root.is_dir() {
            return Err(VaultError::NotAFolder {
                path: root.to_string_lossy().to_string(),
            });
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a normalized vault path onto the disk
    pub fn resolve(&self, vault_path: &str) -> PathBuf {
        if vault_path == ROOT {
            return self.root.clone();
        }
        vault_path
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

#[async_trait]
impl VaultStore for LocalVault {
    async fn entry(&self, vault_path: &str) -> Result<Option<EntryKind>, VaultError> {
        let target = self.resolve(vault_path);
        match tokio::fs::metadata(&target).await {
            Ok(metadata) if metadata.is_dir() => Ok(Some(EntryKind::Folder)),
            Ok(_) => Ok(Some(EntryKind::File)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // A dangling symlink still occupies the name
                match tokio::fs::symlink_metadata(&target).await {
                    Ok(metadata) if metadata.file_type().is_symlink() => {
                        Ok(Some(EntryKind::File))
                    }
                    Ok(_) => Ok(None),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(VaultError::from_io(vault_path, e)),
                }
            }
            Err(e) => Err(VaultError::from_io(vault_path, e)),
        }
    }

    async fn create_binary(&self, vault_path: &str, data: &[u8]) -> Result<(), VaultError> {
        if vault_path == ROOT {
            return Err(VaultError::AlreadyExists {
                path: vault_path.to_string(),
            });
        }

        let parent = path::parent(vault_path);
        match self.entry(parent).await? {
            Some(EntryKind::Folder) => {}
            Some(EntryKind::File) => {
                return Err(VaultError::NotAFolder {
                    path: parent.to_string(),
                })
            }
            None => {
                return Err(VaultError::NotFound {
                    path: parent.to_string(),
                })
            }
        }

        let target = self.resolve(vault_path);

        // create_new: a file that appeared after the collision check fails here
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|e| VaultError::from_io(vault_path, e))?;

        let written = async {
            file.write_all(data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = tokio::fs::remove_file(&target).await {
                tracing::warn!(
                    path = %vault_path,
                    error = %cleanup,
                    "failed to remove partially written file"
                );
            }
            return Err(VaultError::from_io(vault_path, e));
        }

        Ok(())
    }

    async fn read_binary(&self, vault_path: &str) -> Result<Vec<u8>, VaultError> {
        let target = self.resolve(vault_path);
        let metadata = tokio::fs::metadata(&target)
            .await
            .map_err(|e| VaultError::from_io(vault_path, e))?;

        if !metadata.is_file() {
            return Err(VaultError::NotAFile {
                path: vault_path.to_string(),
            });
        }

        tokio::fs::read(&target)
            .await
            .map_err(|e| VaultError::from_io(vault_path, e))
    }

    async fn locate(&self, vault_path: &str) -> Option<PathBuf> {
        let target = self.resolve(vault_path);
        match tokio::fs::try_exists(&target).await {
            Ok(true) => Some(target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault() -> (TempDir, LocalVault) {
        let dir = TempDir::new().unwrap();
        let vault = LocalVault::open(dir.path()).unwrap();
        (dir, vault)
    }

    #[tokio::test]
    async fn test_entry_kinds() {
        let (dir, vault) = vault();
        std::fs::create_dir(dir.path().join("notes")).unwrap();
        std::fs::write(dir.path().join("notes").join("a.md"), b"# a").unwrap();

        assert_eq!(vault.entry(ROOT).await.unwrap(), Some(EntryKind::Folder));
        assert_eq!(vault.entry("notes").await.unwrap(), Some(EntryKind::Folder));
        assert_eq!(vault.entry("notes/a.md").await.unwrap(), Some(EntryKind::File));
        assert_eq!(vault.entry("notes/b.md").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let (_dir, vault) = vault();
        vault.create_binary("blob.bin", &[0, 1, 2, 255]).await.unwrap();
        assert_eq!(vault.read_binary("blob.bin").await.unwrap(), vec![0, 1, 2, 255]);
    }

    #[tokio::test]
    async fn test_create_never_overwrites() {
        let (dir, vault) = vault();
        std::fs::write(dir.path().join("a.txt"), b"original").unwrap();

        let err = vault.create_binary("a.txt", b"replacement").await.unwrap_err();
        assert!(matches!(err, VaultError::AlreadyExists { .. }));
        assert_eq!(std::fs::read(dir.path().join("a.txt")).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_create_requires_parent_folder() {
        let (_dir, vault) = vault();
        let err = vault.create_binary("missing/a.txt", b"x").await.unwrap_err();
        assert!(matches!(err, VaultError::NotFound { path } if path == "missing"));
    }

    #[tokio::test]
    async fn test_read_folder_is_rejected() {
        let (dir, vault) = vault();
        std::fs::create_dir(dir.path().join("notes")).unwrap();
        assert!(matches!(
            vault.read_binary("notes").await,
            Err(VaultError::NotAFile { .. })
        ));
        assert!(matches!(
            vault.read_binary("ghost.md").await,
            Err(VaultError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_locate() {
        let (dir, vault) = vault();
        std::fs::write(dir.path().join("a.txt"), b"x").unwrap();
        assert_eq!(vault.locate("a.txt").await, Some(dir.path().join("a.txt")));
        assert_eq!(vault.locate("b.txt").await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_symlink_is_an_entry() {
        let (dir, vault) = vault();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("a.txt")).unwrap();

        assert_eq!(vault.entry("a.txt").await.unwrap(), Some(EntryKind::File));
        assert_eq!(vault.entry("b.txt").await.unwrap(), None);
    }
}
