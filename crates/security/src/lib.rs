//! Security module for NoteClaw: capability permissions, glob matching,
//! vault path containment, and audit logging.
//!
//! Provides:
//! - **Glob matching**: capability patterns with directory shorthands and
//!   traversal rejection
//! - **Permission guard**: the allow/deny decision for an agent's file operations
//! - **Path containment**: resolving vault paths for filesystem stores
//! - **Audit logging**: structured security event logging

pub mod audit;
pub mod glob;
pub mod path;
pub mod permission;

pub use audit::{AuditEntry, AuditEvent, AuditLogger, AuditOutcome, AuditSink, TracingSink};
pub use glob::{GlobMatcher, has_traversal, normalize_path};
pub use path::{PathValidationError, resolve_in_vault};
pub use permission::{Denial, PermissionGuard, is_root_level};
