//! FileStore trait: the abstraction over the note vault.
//!
//! Paths are vault-relative and use `/` as the separator. Tools reach the
//! store only after a permission check; nothing else in the agent loop
//! touches it directly.

use async_trait::async_trait;

use crate::error::StoreError;

/// One entry returned by [`FileStore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    /// Vault-relative path
    pub path: String,
    pub is_folder: bool,
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// A human-readable name for this store (e.g., "in_memory", "fs").
    fn name(&self) -> &str;

    /// Read a note's full text.
    async fn read(&self, path: &str) -> Result<String, StoreError>;

    /// Create a new note. Fails if it already exists.
    async fn create(&self, path: &str, content: &str) -> Result<(), StoreError>;

    /// Replace the content of an existing note.
    async fn modify(&self, path: &str, content: &str) -> Result<(), StoreError>;

    /// Move or rename a note. Fails if the destination exists.
    async fn rename(&self, from: &str, to: &str) -> Result<(), StoreError>;

    /// Delete a note.
    async fn delete(&self, path: &str) -> Result<(), StoreError>;

    async fn exists(&self, path: &str) -> Result<bool, StoreError>;

    /// Direct children of `folder` (`""` for the vault root).
    async fn list(&self, folder: &str) -> Result<Vec<VaultEntry>, StoreError>;
}
