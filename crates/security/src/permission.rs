//! PermissionGuard: capability-scoped access decisions.
//!
//! Decision order for `(agent, operation, path)`:
//! 1. The operation's pattern list is empty → deny, nothing else is checked.
//! 2. A path at the vault root (no separator) without `vault_root_access` → deny.
//! 3. A path is given → the glob match decides.
//! 4. No path (capability check) → allow.
//!
//! Folders are checked separately: a folder may be entered when some
//! pattern of the operation could match a note inside it.

use std::sync::Arc;

use noteclaw_core::agent::{AgentConfig, FileOperation};
use noteclaw_core::error::PermissionError;
use tracing::debug;

use crate::audit::{AuditEvent, AuditLogger, AuditOutcome};
use crate::glob::{GlobMatcher, normalize_path};

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    CapabilityDisabled,
    RootLevel,
    NoMatch,
}

#[derive(Debug, Clone, Default)]
pub struct PermissionGuard {
    matcher: GlobMatcher,
    audit: Option<Arc<AuditLogger>>,
}

impl PermissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record denials and traversal attempts in `audit`.
    pub fn with_audit(audit: Arc<AuditLogger>) -> Self {
        Self {
            matcher: GlobMatcher::with_audit(audit.clone()),
            audit: Some(audit),
        }
    }

    pub fn audit(&self) -> Option<&Arc<AuditLogger>> {
        self.audit.as_ref()
    }

    /// Whether `config` may perform `operation` on `path`.
    ///
    /// `path == None` asks whether the capability exists at all.
    pub fn has_permission(
        &self,
        config: &AgentConfig,
        operation: FileOperation,
        path: Option<&str>,
    ) -> bool {
        self.decide(config, operation, path).is_ok()
    }

    /// Like [`has_permission`](Self::has_permission) but returns the denial
    /// as an error and records it in the audit log.
    pub fn assert_permission(
        &self,
        config: &AgentConfig,
        operation: FileOperation,
        path: Option<&str>,
    ) -> Result<(), PermissionError> {
        self.decide(config, operation, path)
            .map_err(|denial| self.deny(config, operation, path, denial))
    }

    /// Whether any note inside `folder` could be permitted for `operation`.
    ///
    /// The vault root is enterable whenever the capability exists.
    pub fn can_enter(&self, config: &AgentConfig, operation: FileOperation, folder: &str) -> bool {
        self.decide_folder(config, operation, folder).is_ok()
    }

    /// Like [`can_enter`](Self::can_enter), returning an audited denial.
    pub fn assert_can_enter(
        &self,
        config: &AgentConfig,
        operation: FileOperation,
        folder: &str,
    ) -> Result<(), PermissionError> {
        self.decide_folder(config, operation, folder)
            .map_err(|denial| self.deny(config, operation, Some(folder), denial))
    }

    fn decide_folder(
        &self,
        config: &AgentConfig,
        operation: FileOperation,
        folder: &str,
    ) -> Result<(), Denial> {
        let patterns = config.permissions.patterns(operation);
        if patterns.is_empty() {
            return Err(Denial::CapabilityDisabled);
        }
        if self.matcher.reaches_into(folder, patterns) {
            Ok(())
        } else {
            Err(Denial::NoMatch)
        }
    }

    fn deny(
        &self,
        config: &AgentConfig,
        operation: FileOperation,
        path: Option<&str>,
        denial: Denial,
    ) -> PermissionError {
        debug!(
            agent = %config.name,
            operation = %operation,
            path = ?path,
            reason = ?denial,
            "Permission denied"
        );
        if let Some(audit) = &self.audit {
            let event = match denial {
                Denial::CapabilityDisabled => AuditEvent::CapabilityDisabled {
                    operation: operation.to_string(),
                },
                Denial::RootLevel | Denial::NoMatch => AuditEvent::PathDenied {
                    operation: operation.to_string(),
                    path: path.unwrap_or_default().to_string(),
                },
            };
            audit.log(
                event,
                &config.name,
                path.unwrap_or_default(),
                AuditOutcome::Denied,
                Some(format!("{denial:?}")),
            );
        }
        PermissionError {
            agent: config.name.clone(),
            operation,
            path: path.map(str::to_string),
        }
    }

    /// The decision procedure, with the reason for a refusal.
    pub fn decide(
        &self,
        config: &AgentConfig,
        operation: FileOperation,
        path: Option<&str>,
    ) -> Result<(), Denial> {
        let patterns = config.permissions.patterns(operation);
        if patterns.is_empty() {
            return Err(Denial::CapabilityDisabled);
        }

        let Some(path) = path else {
            return Ok(());
        };

        if is_root_level(path) && !config.vault_root_access {
            return Err(Denial::RootLevel);
        }

        if self.matcher.is_match(path, patterns) {
            Ok(())
        } else {
            Err(Denial::NoMatch)
        }
    }
}

/// A path directly in the vault root (no folder component).
pub fn is_root_level(path: &str) -> bool {
    !normalize_path(path).trim_end_matches('/').contains('/')
}
