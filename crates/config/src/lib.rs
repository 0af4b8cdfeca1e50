//! Configuration loading, validation, and management for NoteClaw.
//!
//! Loads the application configuration from `~/.noteclaw/config.toml` with
//! environment variable overrides, and agent definitions from `*.toml`
//! documents in the agents directory (see [`agents`]).

pub mod agents;

use noteclaw_core::provider::GenerationSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use agents::{AgentCatalog, load_agent, load_agents_dir, parse_agent};

/// The root configuration structure.
///
/// Maps directly to `~/.noteclaw/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root folder of the note vault
    #[serde(default = "default_vault_root")]
    pub vault_root: PathBuf,

    /// Folder holding agent definitions; defaults to `<vault_root>/agents`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents_dir: Option<PathBuf>,

    /// Chat and tool-loop settings
    #[serde(default)]
    pub chat: ChatConfig,
}

fn default_vault_root() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Ceiling on provider rounds per user message
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Largest note body inlined for a `[[reference]]`
    #[serde(default = "default_max_reference_bytes")]
    pub max_reference_bytes: usize,
}

fn default_max_tool_rounds() -> u32 {
    25
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_reference_bytes() -> usize {
    20_000
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_tool_rounds: default_max_tool_rounds(),
            temperature: default_temperature(),
            max_tokens: None,
            max_reference_bytes: default_max_reference_bytes(),
        }
    }
}

impl ChatConfig {
    /// Sampling settings sent with each provider request.
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.noteclaw/config.toml).
    ///
    /// Environment overrides:
    /// - `NOTECLAW_VAULT` replaces `vault_root`
    /// - `NOTECLAW_AGENTS_DIR` replaces `agents_dir`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(vault) = std::env::var("NOTECLAW_VAULT") {
            config.vault_root = PathBuf::from(vault);
        }

        if let Ok(dir) = std::env::var("NOTECLAW_AGENTS_DIR") {
            config.agents_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".noteclaw")
    }

    /// The effective agents directory.
    pub fn agents_dir(&self) -> PathBuf {
        self.agents_dir
            .clone()
            .unwrap_or_else(|| self.vault_root.join("agents"))
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.chat.temperature < 0.0 || self.chat.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "chat.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.chat.max_tool_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "chat.max_tool_rounds must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vault_root: default_vault_root(),
            agents_dir: None,
            chat: ChatConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {}: {reason}", .path.display())]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {}: {reason}", .path.display())]
    ParseError { path: PathBuf, reason: String },

    #[error("Agent definition at {} is missing required field '{field}'", .path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
