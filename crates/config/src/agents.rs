//! Agent definition documents.
//!
//! An agent is declared as a TOML document:
//!
//! ```toml
//! name = "Librarian"
//! model = "gpt-4o"
//! description = "Files and tidies notes"
//! stream = true
//! vault_root_access = false
//!
//! [permissions]
//! read = ["/"]
//! create = ["Inbox/"]
//! move = ["Inbox/", "Archive/"]
//! ```
//!
//! `name` and `model` are required; every capability list defaults to empty,
//! which denies that operation.

use noteclaw_core::agent::{AgentConfig, DEFAULT_PROMPT, Permissions};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::ConfigError;

/// On-disk shape of an agent document, before required-field checks.
#[derive(Debug, Deserialize)]
struct AgentDefinition {
    name: Option<String>,
    model: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default = "default_provider")]
    provider: String,
    #[serde(default = "default_true")]
    stream: bool,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    permissions: Permissions,
    #[serde(default)]
    vault_root_access: bool,
    #[serde(default = "default_true")]
    confirm_destructive: bool,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_true() -> bool {
    true
}

fn required(value: Option<String>, path: &Path, field: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingField {
            path: path.to_path_buf(),
            field,
        }),
    }
}

/// Parse an agent document. `source` is only used in error messages.
pub fn parse_agent(content: &str, source: &Path) -> Result<AgentConfig, ConfigError> {
    let def: AgentDefinition = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;

    let name = required(def.name, source, "name")?;
    let model = required(def.model, source, "model")?;

    Ok(AgentConfig {
        name,
        avatar: def.avatar,
        description: def.description,
        provider: def.provider,
        model,
        stream: def.stream,
        prompt: def
            .prompt
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
        permissions: def.permissions,
        vault_root_access: def.vault_root_access,
        confirm_destructive: def.confirm_destructive,
    })
}

/// Load a single agent document from disk.
pub fn load_agent(path: &Path) -> Result<AgentConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_agent(&content, path)
}

/// Agents loaded from a directory, plus the documents that failed.
#[derive(Debug, Default)]
pub struct AgentCatalog {
    pub agents: Vec<AgentConfig>,
    pub errors: Vec<(PathBuf, ConfigError)>,
}

impl AgentCatalog {
    /// Look an agent up by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&AgentConfig> {
        self.agents
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

/// Load every `*.toml` agent in `dir`, sorted by file name.
///
/// A broken document is recorded in `errors` and skipped; it never prevents
/// the remaining agents from loading. A missing directory yields an empty
/// catalog.
pub fn load_agents_dir(dir: &Path) -> Result<AgentCatalog, ConfigError> {
    let mut catalog = AgentCatalog::default();
    if !dir.exists() {
        debug!("Agents directory {} does not exist", dir.display());
        return Ok(catalog);
    }

    let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::ReadError {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    for path in paths {
        match load_agent(&path) {
            Ok(agent) => {
                if catalog.find(&agent.name).is_some() {
                    warn!(agent = %agent.name, path = %path.display(), "Duplicate agent name, skipping");
                    catalog.errors.push((
                        path.clone(),
                        ConfigError::ValidationError(format!(
                            "duplicate agent name '{}'",
                            agent.name
                        )),
                    ));
                    continue;
                }
                debug!(agent = %agent.name, "Loaded agent definition");
                catalog.agents.push(agent);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load agent definition");
                catalog.errors.push((path, e));
            }
        }
    }

    Ok(catalog)
}
