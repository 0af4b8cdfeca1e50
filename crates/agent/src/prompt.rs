//! System prompt templates.
//!
//! Placeholders are `{{agent.name}}`, `{{agent.description}}`, `{{date}}`,
//! `{{time}}` and `{{tools}}`. Unknown placeholders are left as written.

use chrono::{DateTime, Local};
use noteclaw_core::agent::AgentConfig;

/// Render `config.prompt` for a session starting at `now`.
pub fn render_prompt(config: &AgentConfig, tool_names: &[&str], now: DateTime<Local>) -> String {
    let tools = if tool_names.is_empty() {
        "none".to_string()
    } else {
        tool_names.join(", ")
    };

    config
        .prompt
        .replace("{{agent.name}}", &config.name)
        .replace("{{agent.description}}", &config.description)
        .replace("{{date}}", &now.format("%Y-%m-%d").to_string())
        .replace("{{time}}", &now.format("%H:%M").to_string())
        .replace("{{tools}}", &tools)
}
