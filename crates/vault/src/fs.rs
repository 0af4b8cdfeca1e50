//! Filesystem-backed vault: notes are plain files under a root directory.
//!
//! Every path goes through [`resolve_in_vault`] before touching the disk, so
//! absolute paths, `..` components, and symlinks leading out of the root are
//! refused. Hidden entries (`.obsidian`, `.git`, ...) are left out of listings.

use async_trait::async_trait;
use noteclaw_core::error::StoreError;
use noteclaw_core::vault::{FileStore, VaultEntry};
use noteclaw_security::{PathValidationError, normalize_path, resolve_in_vault};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    /// Open a vault rooted at `root`. The directory must already exist.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::Io {
                path: root.display().to_string(),
                reason: "vault root is not a directory".into(),
            });
        }
        debug!(root = %root.display(), "Filesystem vault opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        if normalize_path(path).trim_end_matches('/').is_empty() {
            return Err(StoreError::InvalidPath {
                path: path.into(),
                reason: "empty path".into(),
            });
        }
        resolve_in_vault(&self.root, path).map_err(|e| invalid(path, e))
    }

    fn relative(&self, full: &Path) -> String {
        full.strip_prefix(&self.root)
            .unwrap_or(full)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

fn invalid(path: &str, err: PathValidationError) -> StoreError {
    StoreError::InvalidPath {
        path: path.into(),
        reason: err.to_string(),
    }
}

fn io_error(path: &str, err: std::io::Error) -> StoreError {
    match err.kind() {
        ErrorKind::NotFound => StoreError::NotFound(path.into()),
        ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.into()),
        _ => StoreError::Io {
            path: path.into(),
            reason: err.to_string(),
        },
    }
}

async fn ensure_parent(full: &Path, path: &str) -> Result<(), StoreError> {
    if let Some(parent) = full.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(path, e))?;
    }
    Ok(())
}

#[async_trait]
impl FileStore for FsVault {
    fn name(&self) -> &str {
        "fs"
    }

    async fn read(&self, path: &str) -> Result<String, StoreError> {
        let full = self.resolve(path)?;
        if full.is_dir() {
            return Err(StoreError::InvalidPath {
                path: path.into(),
                reason: "is a folder".into(),
            });
        }
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| io_error(path, e))
    }

    async fn create(&self, path: &str, content: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;
        if full.exists() {
            return Err(StoreError::AlreadyExists(path.into()));
        }
        ensure_parent(&full, path).await?;
        tokio::fs::write(&full, content)
            .await
            .map_err(|e| io_error(path, e))?;
        debug!(path = %path, bytes = content.len(), "Note created");
        Ok(())
    }

    async fn modify(&self, path: &str, content: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(StoreError::NotFound(path.into()));
        }
        tokio::fs::write(&full, content)
            .await
            .map_err(|e| io_error(path, e))?;
        debug!(path = %path, bytes = content.len(), "Note modified");
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), StoreError> {
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;
        if !source.exists() {
            return Err(StoreError::NotFound(from.into()));
        }
        if target.exists() {
            return Err(StoreError::AlreadyExists(to.into()));
        }
        ensure_parent(&target, to).await?;
        tokio::fs::rename(&source, &target)
            .await
            .map_err(|e| io_error(from, e))?;
        debug!(from = %from, to = %to, "Note moved");
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;
        if full.is_dir() {
            return Err(StoreError::InvalidPath {
                path: path.into(),
                reason: "is a folder".into(),
            });
        }
        tokio::fs::remove_file(&full)
            .await
            .map_err(|e| io_error(path, e))?;
        debug!(path = %path, "Note deleted");
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        let full = self.resolve(path)?;
        Ok(full.exists())
    }

    async fn list(&self, folder: &str) -> Result<Vec<VaultEntry>, StoreError> {
        let dir = if normalize_path(folder).trim_end_matches('/').is_empty() {
            self.root.clone()
        } else {
            self.resolve(folder)?
        };

        let mut reader = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| io_error(folder, e))?;
        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| io_error(folder, e))?
        {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let is_folder = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            entries.push(VaultEntry {
                path: self.relative(&entry.path()),
                is_folder,
            });
        }

        entries.sort_by(|a, b| b.is_folder.cmp(&a.is_folder).then(a.path.cmp(&b.path)));
        Ok(entries)
    }
}
