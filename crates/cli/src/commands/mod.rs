pub mod agents;
pub mod check;
pub mod init;
pub mod run;
pub mod tools;

use std::path::Path;

use noteclaw_config::{AppConfig, ConfigError, load_agents_dir};
use noteclaw_core::agent::AgentConfig;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load the config from `path`, or from the default location with
/// environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

/// Look an agent up by name in the configured agents directory.
pub fn find_agent(config: &AppConfig, name: &str) -> Result<AgentConfig, Box<dyn std::error::Error>> {
    let dir = config.agents_dir();
    let catalog = load_agents_dir(&dir)?;
    for (path, error) in &catalog.errors {
        tracing::warn!(path = %path.display(), error = %error, "Skipped agent definition");
    }
    catalog
        .find(name)
        .cloned()
        .ok_or_else(|| format!("no agent named '{name}' in {}", dir.display()).into())
}
