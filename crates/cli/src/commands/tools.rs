//! `noteclaw tools`: the tools an agent would be offered.

use std::path::Path;

use noteclaw_core::provider::ToolDefinition;

use super::{CommandResult, find_agent, load_config};

pub fn run(config_path: Option<&Path>, agent: &str, schema: bool) -> CommandResult {
    let config = load_config(config_path)?;
    let agent = find_agent(&config, agent)?;

    let definitions: Vec<ToolDefinition> = noteclaw_tools::default_registry()
        .available(&agent)
        .into_iter()
        .map(|tool| tool.to_definition())
        .collect();

    if definitions.is_empty() {
        println!("{} has no tools: every capability list is empty", agent.name);
        return Ok(());
    }

    println!("Tools offered to {}:", agent.name);
    for definition in &definitions {
        println!("  {:<12} {}", definition.name, definition.description);
        if schema {
            let pretty = serde_json::to_string_pretty(&definition.parameters)?;
            for line in pretty.lines() {
                println!("      {line}");
            }
        }
    }
    Ok(())
}
