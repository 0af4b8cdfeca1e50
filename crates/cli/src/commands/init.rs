//! `noteclaw init`: first-time setup.

use std::path::Path;

use noteclaw_config::AppConfig;

use super::{CommandResult, load_config};

const EXAMPLE_AGENT: &str = r#"name = "Librarian"
model = "gpt-4o"
description = "Reads the vault and files new notes into the inbox"
stream = true
confirm_destructive = true
prompt = """
You are {{agent.name}}, {{agent.description}}.
Today is {{date}}. Available tools: {{tools}}.
"""

[permissions]
read = ["/"]
create = ["Inbox/"]
write = ["Inbox/"]
move = ["Inbox/", "Archive/"]
"#;

pub fn run(config_path: Option<&Path>) -> CommandResult {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => AppConfig::config_dir().join("config.toml"),
    };

    println!("NoteClaw setup");
    println!("==============\n");

    if config_file.exists() {
        println!("  Config file exists: {}", config_file.display());
    } else {
        if let Some(parent) = config_file.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_file, AppConfig::default_toml())?;
        println!("  Created config file: {}", config_file.display());
    }

    let config = load_config(Some(&config_file))?;
    let agents_dir = config.agents_dir();
    if !agents_dir.exists() {
        std::fs::create_dir_all(&agents_dir)?;
        println!("  Created agents directory: {}", agents_dir.display());
    }

    let example = agents_dir.join("librarian.toml");
    if !example.exists() {
        std::fs::write(&example, EXAMPLE_AGENT)?;
        println!("  Created example agent: {}", example.display());
    }

    println!("\nEdit {} to point vault_root at your notes.", config_file.display());
    Ok(())
}
