//! Inline note references.
//!
//! `[[Note]]`, `[[folder/Note.md]]`, `[[Note|alias]]` and `[[Note#Heading]]`
//! mentions in user text are read through the [`ToolHandler`] (so the
//! agent's `read` list applies) and appended as fenced context blocks.

use std::sync::LazyLock;

use noteclaw_core::agent::AgentConfig;
use noteclaw_tools::ToolHandler;
use regex_lite::Regex;
use tracing::debug;

static REFERENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]|#]+)(?:[|#][^\[\]]*)?\]\]").ok());

/// Referenced note paths in order of first mention, `.md` added when missing.
pub fn extract_references(text: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    let Some(pattern) = REFERENCE.as_ref() else {
        return paths;
    };
    for captures in pattern.captures_iter(text) {
        let raw = captures[1].trim();
        if raw.is_empty() {
            continue;
        }
        let path = if raw.to_ascii_lowercase().ends_with(".md") {
            raw.to_string()
        } else {
            format!("{raw}.md")
        };
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// Expand references in `text` for `config`. Text without references is
/// returned unchanged.
pub async fn expand_references(
    text: &str,
    config: &AgentConfig,
    tools: &ToolHandler,
    max_bytes: usize,
) -> String {
    let paths = extract_references(text);
    if paths.is_empty() {
        return text.to_string();
    }

    let mut expanded = text.to_string();
    let mut skipped = Vec::new();
    for path in paths {
        match tools.read_for_context(config, &path).await {
            Ok(content) => {
                let body = truncate(&content, max_bytes);
                expanded.push_str(&format!("\n\n---\nReferenced note `{path}`:\n```md\n{body}"));
                if body.len() < content.len() {
                    expanded.push_str("\n[truncated]");
                }
                expanded.push_str("\n```");
            }
            Err(e) => {
                debug!(agent = %config.name, path = %path, error = %e, "Reference not inlined");
                skipped.push(format!("{path} ({})", e.kind()));
            }
        }
    }

    if !skipped.is_empty() {
        expanded.push_str(&format!(
            "\n\n(Could not include referenced notes: {})",
            skipped.join(", ")
        ));
    }
    expanded
}

/// The longest prefix of `text` within `max_bytes` that ends on a char boundary.
fn truncate(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
