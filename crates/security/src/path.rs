//! Path containment: keep vault-relative paths inside the vault root.
//!
//! Used by filesystem-backed stores to turn a vault path from a tool call
//! into an absolute path, refusing anything that could land outside the
//! vault (absolute paths, `..` components, symlinks pointing elsewhere).

use std::path::{Component, Path, PathBuf};

use crate::glob::{has_traversal, normalize_path};

/// Error returned when path validation fails.
#[derive(Debug, thiserror::Error)]
pub enum PathValidationError {
    #[error("Path '{path}' is absolute; vault paths must be relative")]
    Absolute { path: String },

    #[error("Path traversal detected in '{path}'")]
    PathTraversal { path: String },

    #[error("Path '{path}' resolves outside the vault")]
    OutsideVault { path: String },

    #[error("Failed to canonicalize path '{path}': {reason}")]
    CanonicalizeFailed { path: String, reason: String },
}

/// Resolve a vault-relative `path` under `root`.
///
/// Checks:
/// 1. No `..` components in any separator style
/// 2. Not absolute (including `C:`-style prefixes)
/// 3. The nearest existing ancestor, once canonicalized, is still under the
///    canonical root (catches symlinks leading out of the vault)
pub fn resolve_in_vault(root: &Path, path: &str) -> Result<PathBuf, PathValidationError> {
    if has_traversal(path) {
        return Err(PathValidationError::PathTraversal { path: path.into() });
    }

    let unified = path.trim().replace('\\', "/");
    let candidate = Path::new(&unified);
    if candidate.is_absolute()
        || candidate
            .components()
            .any(|c| matches!(c, Component::Prefix(_)))
        || unified.as_bytes().get(1) == Some(&b':')
    {
        return Err(PathValidationError::Absolute { path: path.into() });
    }

    let relative = normalize_path(&unified);
    let joined = root.join(relative.trim_end_matches('/'));

    let canonical_root = root
        .canonicalize()
        .map_err(|e| PathValidationError::CanonicalizeFailed {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;

    // Walk up to the nearest ancestor that exists and check where it lands.
    let mut existing = joined.as_path();
    while !existing.exists() {
        match existing.parent() {
            Some(parent) => existing = parent,
            None => break,
        }
    }
    let canonical_existing =
        existing
            .canonicalize()
            .map_err(|e| PathValidationError::CanonicalizeFailed {
                path: path.into(),
                reason: e.to_string(),
            })?;

    if !canonical_existing.starts_with(&canonical_root) {
        return Err(PathValidationError::OutsideVault { path: path.into() });
    }

    Ok(joined)
}
