//! ToolHandler: dispatches the model's tool calls.
//!
//! Order for one call: look the tool up, check it is offered to the agent,
//! parse the arguments into [`ToolArgs`], then let the tool run its own
//! permission check before it reaches the store. Every failure comes back as
//! a [`ToolError`] so the caller can hand it to the model as a tool result.

use std::sync::Arc;

use noteclaw_core::agent::{AgentConfig, FileOperation};
use noteclaw_core::error::ToolError;
use noteclaw_core::message::MessageToolCall;
use noteclaw_core::provider::ToolDefinition;
use noteclaw_core::vault::FileStore;
use noteclaw_security::{AuditEvent, AuditOutcome, PermissionGuard};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::args::ToolArgs;
use crate::tool::{Confirmer, Tool, ToolContext, ToolRegistry};

pub struct ToolHandler {
    registry: ToolRegistry,
    store: Arc<dyn FileStore>,
    guard: PermissionGuard,
    confirmer: Option<Arc<dyn Confirmer>>,
}

impl ToolHandler {
    /// A handler over `store` with the built-in catalog and an unaudited guard.
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            registry: crate::default_registry(),
            store,
            guard: PermissionGuard::new(),
            confirmer: None,
        }
    }

    pub fn with_guard(mut self, guard: PermissionGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_confirmer(mut self, confirmer: Arc<dyn Confirmer>) -> Self {
        self.confirmer = Some(confirmer);
        self
    }

    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn guard(&self) -> &PermissionGuard {
        &self.guard
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Tools offered to `config`, in catalog order.
    pub fn available_tools(&self, config: &AgentConfig) -> Vec<&dyn Tool> {
        self.registry.available(config)
    }

    /// Definitions sent to the model for `config`.
    pub fn definitions_for(&self, config: &AgentConfig) -> Vec<ToolDefinition> {
        self.available_tools(config)
            .into_iter()
            .map(|t| t.to_definition())
            .collect()
    }

    /// Run `tool_name` with the raw JSON argument string the model produced.
    pub async fn execute_tool(
        &self,
        config: &AgentConfig,
        tool_name: &str,
        raw_args: &str,
    ) -> Result<Value, ToolError> {
        let result = self.dispatch(config, tool_name, raw_args).await;
        self.record(config, tool_name, &result);
        result
    }

    /// Run a tool call and render its outcome as tool-message content.
    pub async fn execute_call(&self, config: &AgentConfig, call: &MessageToolCall) -> String {
        let result = self.execute_tool(config, &call.name, &call.arguments).await;
        result_payload(&result).to_string()
    }

    /// Read a note for inline context, under the agent's `read` list.
    pub async fn read_for_context(
        &self,
        config: &AgentConfig,
        path: &str,
    ) -> Result<String, ToolError> {
        self.guard
            .assert_permission(config, FileOperation::Read, Some(path))?;
        Ok(self.store.read(path).await?)
    }

    async fn dispatch(
        &self,
        config: &AgentConfig,
        tool_name: &str,
        raw_args: &str,
    ) -> Result<Value, ToolError> {
        let tool = self
            .registry
            .get(tool_name)
            .ok_or_else(|| ToolError::NotFound(tool_name.to_string()))?;

        if !tool.is_available(config) {
            // Records the disabled capability in the audit log.
            if let Err(denied) = self.guard.assert_permission(config, tool.operation(), None) {
                debug!(error = %denied, "Capability disabled");
            }
            return Err(ToolError::Unavailable {
                tool_name: tool_name.to_string(),
                agent: config.name.clone(),
            });
        }

        let args = ToolArgs::parse(tool_name, raw_args)?;
        let ctx = ToolContext {
            config,
            store: self.store.as_ref(),
            guard: &self.guard,
            confirmer: self.confirmer.as_deref(),
        };
        tool.execute(&ctx, args).await
    }

    fn record(&self, config: &AgentConfig, tool_name: &str, result: &Result<Value, ToolError>) {
        match result {
            Ok(_) => debug!(agent = %config.name, tool = %tool_name, "Tool executed"),
            Err(e) => warn!(agent = %config.name, tool = %tool_name, kind = e.kind(), error = %e, "Tool failed"),
        }

        let Some(audit) = self.guard.audit() else {
            return;
        };
        let (outcome, details) = match result {
            Ok(_) => (AuditOutcome::Success, None),
            Err(ToolError::PermissionDenied(_))
            | Err(ToolError::Declined { .. })
            | Err(ToolError::Unavailable { .. }) => (AuditOutcome::Denied, None),
            Err(e) => (AuditOutcome::Failure, Some(e.to_string())),
        };
        audit.log(
            AuditEvent::ToolExecution {
                tool_name: tool_name.to_string(),
            },
            &config.name,
            tool_name,
            outcome,
            details,
        );
    }
}

/// The JSON object reported back to the model for a tool outcome.
pub fn result_payload(result: &Result<Value, ToolError>) -> Value {
    match result {
        Ok(value) => value.clone(),
        Err(e) => json!({
            "success": false,
            "error": e.to_string(),
            "kind": e.kind(),
        }),
    }
}
