//! Glob matching for capability patterns.
//!
//! Patterns are vault-relative shell globs: `*` stays inside one path
//! segment, `**` crosses segments, literal segments match exactly.
//! Two directory shorthands are expanded first:
//! - `/` matches every path in the vault
//! - `Folder/` matches everything under `Folder`
//!
//! Any path containing a `..` component is rejected outright and recorded
//! as a security event.

use std::sync::Arc;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::warn;

use crate::audit::{AuditEvent, AuditLogger, AuditOutcome};

/// Normalize a vault path: `/` separators, no duplicate or leading slashes,
/// no leading `./`.
pub fn normalize_path(path: &str) -> String {
    let unified = path.trim().replace('\\', "/");
    let segments: Vec<&str> = unified
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    let mut normalized = segments.join("/");
    if unified.ends_with('/') && !normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Whether `path` has a `..` component in any separator style.
pub fn has_traversal(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}

/// Expand directory shorthands into plain globs.
pub fn normalize_pattern(pattern: &str) -> Option<String> {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "/" {
        return Some("**".into());
    }

    let unified = trimmed.replace('\\', "/");
    let relative = unified.trim_start_matches('/');
    if let Some(dir) = relative.strip_suffix('/') {
        let dir = dir.trim_end_matches('/');
        if dir.ends_with("**") {
            return Some(dir.to_string());
        }
        return Some(format!("{dir}/**"));
    }
    Some(relative.to_string())
}

/// Matches vault paths against capability patterns.
#[derive(Clone, Default)]
pub struct GlobMatcher {
    audit: Option<Arc<AuditLogger>>,
}

impl std::fmt::Debug for GlobMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobMatcher")
            .field("audited", &self.audit.is_some())
            .finish()
    }
}

impl GlobMatcher {
    pub fn new() -> Self {
        Self { audit: None }
    }

    /// Record traversal attempts in `audit` as well as the log.
    pub fn with_audit(audit: Arc<AuditLogger>) -> Self {
        Self { audit: Some(audit) }
    }

    /// Whether `path` matches any of `patterns`.
    ///
    /// Fails closed: no patterns, a traversal component, or no valid
    /// pattern all yield `false`.
    pub fn is_match(&self, path: &str, patterns: &[String]) -> bool {
        if patterns.is_empty() {
            return false;
        }

        if self.rejects_traversal(path) {
            return false;
        }

        let Some(set) = build_glob_set(patterns) else {
            return false;
        };
        let normalized = normalize_path(path);
        set.is_match(normalized.trim_end_matches('/'))
    }

    /// Whether some path inside `folder` could match one of `patterns`.
    ///
    /// Literal pattern segments must equal the folder's segments, a wildcard
    /// segment must match its folder segment, and a `**` segment reaches
    /// everything below it. The vault root (`""`) is reachable by any
    /// pattern.
    pub fn reaches_into(&self, folder: &str, patterns: &[String]) -> bool {
        if patterns.is_empty() || self.rejects_traversal(folder) {
            return false;
        }

        let normalized = normalize_path(folder);
        let folder = normalized.trim_end_matches('/');
        if folder.is_empty() {
            return true;
        }
        let folder: Vec<&str> = folder.split('/').collect();
        patterns
            .iter()
            .filter_map(|p| normalize_pattern(p))
            .any(|p| pattern_reaches(&p, &folder))
    }

    fn rejects_traversal(&self, path: &str) -> bool {
        if !has_traversal(path) {
            return false;
        }
        warn!(path = %path, "Path traversal attempt rejected");
        if let Some(audit) = &self.audit {
            audit.log(
                AuditEvent::PathTraversal { path: path.into() },
                "glob_matcher",
                path,
                AuditOutcome::Denied,
                None,
            );
        }
        true
    }
}

fn pattern_reaches(pattern: &str, folder: &[&str]) -> bool {
    let segments: Vec<&str> = pattern.split('/').collect();
    for (i, name) in folder.iter().enumerate() {
        let Some(segment) = segments.get(i) else {
            return false;
        };
        if segment.contains("**") {
            return true;
        }
        let matches = match Glob::new(segment) {
            Ok(glob) => glob.compile_matcher().is_match(name),
            Err(_) => false,
        };
        if !matches {
            return false;
        }
    }
    // Something must remain below the folder for a note to live there.
    segments.len() > folder.len()
}

fn build_glob_set(patterns: &[String]) -> Option<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let mut added = 0usize;
    for raw in patterns {
        let Some(pattern) = normalize_pattern(raw) else {
            continue;
        };
        match GlobBuilder::new(&pattern).literal_separator(true).build() {
            Ok(glob) => {
                builder.add(glob);
                added += 1;
            }
            Err(e) => warn!(pattern = %raw, error = %e, "Ignoring invalid glob pattern"),
        }
    }
    if added == 0 {
        return None;
    }
    match builder.build() {
        Ok(set) => Some(set),
        Err(e) => {
            warn!(error = %e, "Failed to compile glob patterns");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pats(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_patterns_never_match() {
        let m = GlobMatcher::new();
        assert!(!m.is_match("a.md", &[]));
        assert!(!m.is_match("Inbox/a.md", &[]));
    }

    #[test]
    fn root_pattern_matches_everything() {
        let m = GlobMatcher::new();
        let all = pats(&["/"]);
        assert!(m.is_match("a.md", &all));
        assert!(m.is_match("Inbox/x.md", &all));
        assert!(m.is_match("deep/er/still/z.md", &all));
    }

    #[test]
    fn folder_shorthand_matches_descendants_only() {
        let m = GlobMatcher::new();
        let inbox = pats(&["Inbox/"]);
        assert!(m.is_match("Inbox/x.md", &inbox));
        assert!(m.is_match("Inbox/sub/y.md", &inbox));
        assert!(!m.is_match("Other/x.md", &inbox));
        assert!(!m.is_match("InboxOld/x.md", &inbox));
    }

    #[test]
    fn single_star_stays_in_segment() {
        let m = GlobMatcher::new();
        let p = pats(&["Daily/*.md"]);
        assert!(m.is_match("Daily/2024-01-01.md", &p));
        assert!(!m.is_match("Daily/archive/2023-12-31.md", &p));
    }

    #[test]
    fn double_star_crosses_segments() {
        let m = GlobMatcher::new();
        let p = pats(&["Projects/**/*.md"]);
        assert!(m.is_match("Projects/a/b/c.md", &p));
        assert!(!m.is_match("Projects/a/b/c.txt", &p));
    }

    #[test]
    fn literal_pattern_matches_exactly() {
        let m = GlobMatcher::new();
        let p = pats(&["Journal/today.md"]);
        assert!(m.is_match("Journal/today.md", &p));
        assert!(!m.is_match("Journal/today.md.bak", &p));
    }

    #[test]
    fn traversal_rejected_regardless_of_patterns() {
        let m = GlobMatcher::new();
        let all = pats(&["/", "**"]);
        assert!(!m.is_match("../secret.md", &all));
        assert!(!m.is_match("Inbox/../../etc/passwd", &all));
        assert!(!m.is_match("Inbox\\..\\x.md", &all));
        assert!(!m.is_match("..", &all));
    }

    #[test]
    fn traversal_is_audited() {
        let audit = Arc::new(AuditLogger::new());
        let m = GlobMatcher::with_audit(audit.clone());
        assert!(!m.is_match("a/../b.md", &pats(&["/"])));
        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].event,
            AuditEvent::PathTraversal { path: "a/../b.md".into() }
        );
    }

    #[test]
    fn backslashes_are_normalized() {
        let m = GlobMatcher::new();
        assert!(m.is_match("Inbox\\sub\\y.md", &pats(&["Inbox/"])));
        assert!(m.is_match("Inbox/y.md", &pats(&["Inbox\\"])));
    }

    #[test]
    fn leading_slash_and_dot_are_ignored() {
        let m = GlobMatcher::new();
        assert!(m.is_match("/Inbox/y.md", &pats(&["Inbox/"])));
        assert!(m.is_match("./Inbox/y.md", &pats(&["/Inbox/"])));
    }

    #[test]
    fn dotted_names_are_not_traversal() {
        assert!(!has_traversal("notes/v1..v2.md"));
        assert!(!has_traversal("...md"));
        assert!(has_traversal("a/../b"));
    }

    #[test]
    fn pattern_normalization() {
        assert_eq!(normalize_pattern("/").as_deref(), Some("**"));
        assert_eq!(normalize_pattern("Inbox/").as_deref(), Some("Inbox/**"));
        assert_eq!(normalize_pattern("Inbox/**/").as_deref(), Some("Inbox/**"));
        assert_eq!(normalize_pattern("/Daily/*.md").as_deref(), Some("Daily/*.md"));
        assert_eq!(normalize_pattern("  "), None);
    }

    #[test]
    fn folder_reachability_follows_pattern_prefixes() {
        let m = GlobMatcher::new();
        let inbox = pats(&["Inbox/"]);
        assert!(m.reaches_into("", &inbox));
        assert!(m.reaches_into("Inbox", &inbox));
        assert!(m.reaches_into("Inbox/sub/", &inbox));
        assert!(!m.reaches_into("Private", &inbox));
        assert!(!m.reaches_into("InboxOld", &inbox));
        assert!(!m.reaches_into("", &[]));

        let daily = pats(&["Daily/*.md"]);
        assert!(m.reaches_into("Daily", &daily));
        assert!(!m.reaches_into("Daily/archive", &daily));

        let projects = pats(&["Projects/*/notes/"]);
        assert!(m.reaches_into("Projects/alpha", &projects));
        assert!(m.reaches_into("Projects/alpha/notes/deep", &projects));
        assert!(!m.reaches_into("Projects/alpha/drafts", &projects));

        assert!(m.reaches_into("Anything/at/all", &pats(&["/"])));
        assert!(!m.reaches_into("Inbox", &pats(&["*.md"])));
        assert!(m.reaches_into("Journal", &pats(&["Journal/today.md"])));
    }

    #[test]
    fn folder_traversal_is_rejected() {
        let audit = Arc::new(AuditLogger::new());
        let m = GlobMatcher::with_audit(audit.clone());
        assert!(!m.reaches_into("Inbox/../Private", &pats(&["/"])));
        assert_eq!(audit.count(), 1);
    }

    #[test]
    fn invalid_patterns_are_skipped() {
        let m = GlobMatcher::new();
        assert!(!m.is_match("a.md", &pats(&["[unclosed"])));
        assert!(m.is_match("a.md", &pats(&["[unclosed", "*.md"])));
    }
}
