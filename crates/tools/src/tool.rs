//! Tool trait: one self-describing, permission-gated vault action.
//!
//! A tool is offered to the model only when the agent's capability list for
//! the tool's operation is non-empty, and every execution re-checks the
//! concrete path(s) through the [`PermissionGuard`] before touching the store.

use async_trait::async_trait;
use noteclaw_core::agent::{AgentConfig, FileOperation};
use noteclaw_core::error::ToolError;
use noteclaw_core::provider::ToolDefinition;
use noteclaw_core::vault::FileStore;
use noteclaw_security::{AuditEvent, AuditOutcome, PermissionGuard};
use serde_json::Value;
use tracing::info;

use crate::args::ToolArgs;

/// What the user is asked to approve before a destructive action runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub agent: String,
    pub tool_name: String,
    pub operation: FileOperation,
    /// Human-readable one-liner, e.g. `Delete "Inbox/a.md"`.
    pub summary: String,
}

/// Asks the user to approve a destructive action.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, request: &ConfirmRequest) -> bool;
}

/// Everything a tool needs for one execution.
pub struct ToolContext<'a> {
    pub config: &'a AgentConfig,
    pub store: &'a dyn FileStore,
    pub guard: &'a PermissionGuard,
    pub confirmer: Option<&'a dyn Confirmer>,
}

impl ToolContext<'_> {
    /// Check `operation` on `path` for the bound agent.
    pub fn authorize(&self, operation: FileOperation, path: &str) -> Result<(), ToolError> {
        self.guard
            .assert_permission(self.config, operation, Some(path))
            .map_err(ToolError::from)
    }

    /// Ask for approval when the agent wants destructive actions confirmed.
    ///
    /// Without a confirmer the action proceeds.
    pub async fn confirm(
        &self,
        tool_name: &str,
        operation: FileOperation,
        path: &str,
        summary: String,
    ) -> Result<(), ToolError> {
        if !self.config.confirm_destructive || !operation.is_destructive() {
            return Ok(());
        }
        let Some(confirmer) = self.confirmer else {
            return Ok(());
        };

        let request = ConfirmRequest {
            agent: self.config.name.clone(),
            tool_name: tool_name.to_string(),
            operation,
            summary,
        };
        if confirmer.confirm(&request).await {
            return Ok(());
        }

        info!(agent = %self.config.name, tool = %tool_name, path = %path, "Destructive action declined");
        if let Some(audit) = self.guard.audit() {
            audit.log(
                AuditEvent::DestructiveDeclined {
                    tool_name: tool_name.to_string(),
                },
                &self.config.name,
                path,
                AuditOutcome::Denied,
                None,
            );
        }
        Err(ToolError::Declined {
            tool_name: tool_name.to_string(),
            path: path.to_string(),
        })
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "read_file").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the model).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// The capability list that gates this tool.
    fn operation(&self) -> FileOperation;

    /// Whether `config` grants the capability at all.
    fn is_available(&self, config: &AgentConfig) -> bool {
        config.grants(self.operation())
    }

    /// Run the tool. Returns a `{"success": true, ...}` object.
    async fn execute(&self, ctx: &ToolContext<'_>, args: ToolArgs) -> Result<Value, ToolError>;

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// The fixed, ordered tool catalog.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(index) => self.tools[index] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// Tools offered to `config`, in registration order.
    pub fn available(&self, config: &AgentConfig) -> Vec<&dyn Tool> {
        self.tools
            .iter()
            .filter(|t| t.is_available(config))
            .map(|t| t.as_ref())
            .collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON schema for a tool whose parameters are all required strings.
pub(crate) fn string_params(fields: &[(&str, &str)]) -> Value {
    let mut properties = serde_json::Map::new();
    for (name, description) in fields {
        properties.insert(
            (*name).to_string(),
            serde_json::json!({ "type": "string", "description": description }),
        );
    }
    let required: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}
