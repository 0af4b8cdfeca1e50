//! `noteclaw run`: execute one tool call against the vault on disk.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use noteclaw_security::{AuditLogger, PermissionGuard};
use noteclaw_tools::{ConfirmRequest, Confirmer, ToolHandler, result_payload};
use noteclaw_vault::FsVault;

use super::{CommandResult, find_agent, load_config};

/// Confirms destructive actions with a y/N prompt on the terminal.
struct PromptConfirmer {
    assume_yes: bool,
}

#[async_trait]
impl Confirmer for PromptConfirmer {
    async fn confirm(&self, request: &ConfirmRequest) -> bool {
        if self.assume_yes {
            return true;
        }
        let question = format!("{} wants to: {}. Allow? [y/N] ", request.agent, request.summary);
        tokio::task::spawn_blocking(move || ask(&question))
            .await
            .unwrap_or(false)
    }
}

fn ask(question: &str) -> bool {
    let mut stdout = std::io::stdout();
    if write!(stdout, "{question}").and_then(|_| stdout.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub async fn run(
    config_path: Option<&Path>,
    agent: &str,
    tool: &str,
    args: &str,
    assume_yes: bool,
) -> CommandResult {
    let config = load_config(config_path)?;
    let agent = find_agent(&config, agent)?;
    let vault = FsVault::open(config.vault_root.clone())?;

    let handler = ToolHandler::new(Arc::new(vault))
        .with_guard(PermissionGuard::with_audit(Arc::new(AuditLogger::with_tracing())))
        .with_confirmer(Arc::new(PromptConfirmer { assume_yes }));

    let result = handler.execute_tool(&agent, tool, args).await;
    println!("{}", serde_json::to_string_pretty(&result_payload(&result))?);
    Ok(())
}
