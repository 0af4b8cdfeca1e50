//! In-memory vault: useful for testing and ephemeral sessions.

use async_trait::async_trait;
use noteclaw_core::error::StoreError;
use noteclaw_core::vault::{FileStore, VaultEntry};
use noteclaw_security::{has_traversal, normalize_path};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory vault keyed by normalized note path.
/// Folders exist implicitly as prefixes of stored notes.
#[derive(Clone)]
pub struct InMemoryVault {
    notes: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self {
            notes: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Seed a vault with `(path, content)` pairs.
    pub fn with_notes<I, P, C>(notes: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let map = notes
            .into_iter()
            .map(|(p, c)| (normalize_path(p.as_ref()), c.into()))
            .collect();
        Self {
            notes: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of notes stored.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

impl Default for InMemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

fn key(path: &str) -> Result<String, StoreError> {
    if has_traversal(path) {
        return Err(StoreError::InvalidPath {
            path: path.into(),
            reason: "contains '..'".into(),
        });
    }
    let normalized = normalize_path(path);
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(StoreError::InvalidPath {
            path: path.into(),
            reason: "empty path".into(),
        });
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl FileStore for InMemoryVault {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn read(&self, path: &str) -> Result<String, StoreError> {
        let key = key(path)?;
        self.notes
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or(StoreError::NotFound(key))
    }

    async fn create(&self, path: &str, content: &str) -> Result<(), StoreError> {
        let key = key(path)?;
        let mut notes = self.notes.write().await;
        if notes.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        notes.insert(key, content.to_string());
        Ok(())
    }

    async fn modify(&self, path: &str, content: &str) -> Result<(), StoreError> {
        let key = key(path)?;
        let mut notes = self.notes.write().await;
        match notes.get_mut(&key) {
            Some(existing) => {
                *existing = content.to_string();
                Ok(())
            }
            None => Err(StoreError::NotFound(key)),
        }
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), StoreError> {
        let from = key(from)?;
        let to = key(to)?;
        let mut notes = self.notes.write().await;
        if notes.contains_key(&to) {
            return Err(StoreError::AlreadyExists(to));
        }
        let content = notes.remove(&from).ok_or(StoreError::NotFound(from))?;
        notes.insert(to, content);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let key = key(path)?;
        self.notes
            .write()
            .await
            .remove(&key)
            .map(|_| ())
            .ok_or(StoreError::NotFound(key))
    }

    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        let key = key(path)?;
        let notes = self.notes.read().await;
        let folder_prefix = format!("{key}/");
        Ok(notes.contains_key(&key) || notes.keys().any(|k| k.starts_with(&folder_prefix)))
    }

    async fn list(&self, folder: &str) -> Result<Vec<VaultEntry>, StoreError> {
        if has_traversal(folder) {
            return Err(StoreError::InvalidPath {
                path: folder.into(),
                reason: "contains '..'".into(),
            });
        }
        let normalized = normalize_path(folder);
        let base = normalized.trim_end_matches('/');
        let prefix = if base.is_empty() {
            String::new()
        } else {
            format!("{base}/")
        };

        let notes = self.notes.read().await;
        let mut files = Vec::new();
        let mut folders = BTreeSet::new();
        for path in notes.keys().filter(|k| k.starts_with(&prefix)) {
            let rest = &path[prefix.len()..];
            match rest.split_once('/') {
                Some((child, _)) => {
                    folders.insert(format!("{prefix}{child}"));
                }
                None => files.push(VaultEntry {
                    path: path.clone(),
                    is_folder: false,
                }),
            }
        }

        if !base.is_empty() && files.is_empty() && folders.is_empty() {
            return Err(StoreError::NotFound(base.to_string()));
        }

        let mut entries: Vec<VaultEntry> = folders
            .into_iter()
            .map(|path| VaultEntry {
                path,
                is_folder: true,
            })
            .collect();
        entries.extend(files);
        Ok(entries)
    }
}
