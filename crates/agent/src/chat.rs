//! ChatManager: the state of the one active session.
//!
//! Empty (no agent, no messages) becomes Active on [`ChatManager::start_session`]
//! and returns to Empty on [`ChatManager::clear_session`]. While Active the log
//! always starts with exactly one system message, and every tool message
//! answers a tool call made earlier in the same session.

use std::sync::Arc;

use chrono::Local;
use noteclaw_core::agent::AgentConfig;
use noteclaw_core::error::{Error, Result};
use noteclaw_core::message::{ChatMessage, MessageToolCall, Role, SessionId};
use noteclaw_core::provider::Usage;
use noteclaw_tools::{Tool, ToolHandler};
use tracing::debug;

use crate::prompt::render_prompt;

pub struct ChatManager {
    session_id: SessionId,
    agent: Option<AgentConfig>,
    messages: Vec<ChatMessage>,
    new_session: bool,
    usage: Usage,
    tools: Option<Arc<ToolHandler>>,
}

impl ChatManager {
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            agent: None,
            messages: Vec::new(),
            new_session: false,
            usage: Usage::default(),
            tools: None,
        }
    }

    /// Use `tools` to fill `{{tools}}` in system prompts.
    pub fn with_tools(mut self, tools: Arc<ToolHandler>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Bind `agent` and reset the log to its system message.
    pub fn start_session(&mut self, agent: AgentConfig) {
        let system = ChatMessage::system(self.system_prompt(&agent));
        self.session_id = SessionId::new();
        self.messages = vec![system];
        self.new_session = true;
        self.usage = Usage::default();
        debug!(session_id = %self.session_id, agent = %agent.name, "Session started");
        self.agent = Some(agent);
    }

    pub fn has_active_session(&self) -> bool {
        self.agent.is_some() && !self.messages.is_empty()
    }

    pub fn active_agent(&self) -> Option<&AgentConfig> {
        self.agent.as_ref()
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The full log, system message included.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// The transcript shown to the user: user and assistant messages.
    pub fn get_visible_messages(&self) -> Vec<&ChatMessage> {
        self.messages
            .iter()
            .filter(|m| matches!(m.role, Role::User | Role::Assistant))
            .collect()
    }

    /// Text of the last assistant message that has any.
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.last_assistant_text_since(0)
    }

    /// Like [`last_assistant_text`](Self::last_assistant_text), looking only
    /// at messages from position `index` on.
    pub fn last_assistant_text_since(&self, index: usize) -> Option<&str> {
        self.messages
            .get(index..)?
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant && !m.content.is_empty())
            .map(|m| m.content.as_str())
    }

    /// Append a user, assistant or tool message.
    pub fn add_message(&mut self, message: ChatMessage) -> Result<()> {
        if !self.has_active_session() {
            return Err(Error::Session("no active session".into()));
        }
        match message.role {
            Role::System => {
                return Err(Error::Session(
                    "system message is set by start_session".into(),
                ));
            }
            Role::Tool => {
                let Some(call_id) = message.tool_call_id.as_deref() else {
                    return Err(Error::Session("tool message without tool_call_id".into()));
                };
                if !self.has_tool_call(call_id) {
                    return Err(Error::Session(format!(
                        "tool message answers unknown call '{call_id}'"
                    )));
                }
            }
            Role::User | Role::Assistant => {}
        }
        self.messages.push(message);
        Ok(())
    }

    /// Append streamed text to the last message.
    ///
    /// A no-op unless the last message is an assistant message. Returns
    /// whether the chunk was appended.
    pub fn append_chunk_to_last_message(&mut self, chunk: &str) -> bool {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant => {
                last.content.push_str(chunk);
                true
            }
            _ => false,
        }
    }

    /// Set the tool calls of the trailing assistant message once a streamed
    /// round completes.
    pub fn attach_tool_calls(&mut self, tool_calls: Vec<MessageToolCall>) -> bool {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant => {
                last.tool_calls = tool_calls;
                true
            }
            _ => false,
        }
    }

    /// Drop the last message. The system message is never removed.
    pub fn remove_last_message(&mut self) -> Option<ChatMessage> {
        if self.messages.len() <= 1 {
            return None;
        }
        self.messages.pop()
    }

    /// Drop the last message if it is an assistant placeholder with no
    /// content and no tool calls.
    pub fn remove_empty_placeholder(&mut self) -> bool {
        if self.last_message().is_some_and(ChatMessage::is_empty_placeholder) {
            self.messages.pop();
            return true;
        }
        false
    }

    pub fn clear_session(&mut self) {
        debug!(session_id = %self.session_id, "Session cleared");
        self.agent = None;
        self.messages.clear();
        self.new_session = false;
        self.usage = Usage::default();
    }

    /// Swap in an edited config for the same agent, keeping history.
    ///
    /// The system message is re-rendered in place.
    pub fn update_active_agent(&mut self, agent: AgentConfig) -> Result<()> {
        let Some(current) = &self.agent else {
            return Err(Error::Session("no active session".into()));
        };
        if !current.same_identity(&agent) {
            return Err(Error::Session(format!(
                "cannot switch from agent '{}' to '{}' mid-session",
                current.name, agent.name
            )));
        }

        let prompt = self.system_prompt(&agent);
        if let Some(system) = self.messages.first_mut().filter(|m| m.role == Role::System) {
            system.content = prompt;
        }
        self.agent = Some(agent);
        Ok(())
    }

    pub fn record_usage(&mut self, usage: Usage) {
        self.usage += usage;
    }

    /// Token totals for this session.
    pub fn usage(&self) -> Usage {
        self.usage
    }

    /// Whether the session has not logged a turn yet; clears the flag.
    pub fn take_new_session_flag(&mut self) -> bool {
        std::mem::take(&mut self.new_session)
    }

    fn has_tool_call(&self, call_id: &str) -> bool {
        self.messages
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .any(|m| m.tool_calls.iter().any(|c| c.id == call_id))
    }

    fn system_prompt(&self, agent: &AgentConfig) -> String {
        let names: Vec<String> = match &self.tools {
            Some(tools) => tools
                .available_tools(agent)
                .into_iter()
                .map(|t| t.name().to_string())
                .collect(),
            None => Vec::new(),
        };
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        render_prompt(agent, &names, Local::now())
    }
}

impl Default for ChatManager {
    fn default() -> Self {
        Self::new()
    }
}
