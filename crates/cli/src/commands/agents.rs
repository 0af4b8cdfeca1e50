//! `noteclaw agents`: list agent definitions.

use std::path::Path;

use noteclaw_config::load_agents_dir;
use noteclaw_core::agent::{AgentConfig, FileOperation};

use super::{CommandResult, load_config};

const OPERATIONS: [FileOperation; 5] = [
    FileOperation::Read,
    FileOperation::Write,
    FileOperation::Create,
    FileOperation::Move,
    FileOperation::Delete,
];

pub fn run(config_path: Option<&Path>) -> CommandResult {
    let config = load_config(config_path)?;
    let dir = config.agents_dir();
    let catalog = load_agents_dir(&dir)?;

    println!("Agents in {}", dir.display());
    if catalog.agents.is_empty() {
        println!("  (none)");
    }
    for agent in &catalog.agents {
        println!("{}", describe(agent));
    }

    if !catalog.errors.is_empty() {
        println!("\nFailed to load:");
        for (path, error) in &catalog.errors {
            println!("  {}: {error}", path.display());
        }
    }
    Ok(())
}

/// A multi-line summary of an agent's model and capabilities.
fn describe(agent: &AgentConfig) -> String {
    let mut out = format!("\n  {} ({}/{})", agent.name, agent.provider, agent.model);
    if !agent.description.is_empty() {
        out.push_str(&format!("\n    {}", agent.description));
    }
    for operation in OPERATIONS {
        let patterns = agent.permissions.patterns(operation);
        let granted = if patterns.is_empty() {
            "-".to_string()
        } else {
            patterns.join(", ")
        };
        out.push_str(&format!("\n    {:<7} {granted}", operation.as_str()));
    }
    if agent.vault_root_access {
        out.push_str("\n    root-level notes allowed");
    }
    if agent.confirm_destructive {
        out.push_str("\n    asks before write/move/delete");
    }
    out
}
