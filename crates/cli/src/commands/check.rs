//! `noteclaw check`: explain a permission decision.

use std::path::Path;
use std::sync::Arc;

use noteclaw_core::agent::{AgentConfig, FileOperation};
use noteclaw_security::{AuditLogger, Denial, PermissionGuard};

use super::{CommandResult, find_agent, load_config};

pub fn run(
    config_path: Option<&Path>,
    agent: &str,
    operation: &str,
    path: Option<&str>,
) -> CommandResult {
    let config = load_config(config_path)?;
    let agent = find_agent(&config, agent)?;
    let operation: FileOperation = operation.parse()?;

    let guard = PermissionGuard::with_audit(Arc::new(AuditLogger::with_tracing()));
    println!("{}", verdict(&guard, &agent, operation, path));
    Ok(())
}

fn verdict(
    guard: &PermissionGuard,
    agent: &AgentConfig,
    operation: FileOperation,
    path: Option<&str>,
) -> String {
    let target = path.unwrap_or("(capability)");
    let subject = format!("{} {operation} {target}", agent.name);
    match guard.decide(agent, operation, path) {
        Ok(()) => format!("allowed: {subject}"),
        Err(Denial::CapabilityDisabled) => {
            format!("denied: {subject}\n  the {operation} list is empty")
        }
        Err(Denial::RootLevel) => {
            format!("denied: {subject}\n  root-level notes need vault_root_access = true")
        }
        Err(Denial::NoMatch) => format!(
            "denied: {subject}\n  no pattern matches; {operation} = [{}]",
            agent.permissions.patterns(operation).join(", ")
        ),
    }
}
