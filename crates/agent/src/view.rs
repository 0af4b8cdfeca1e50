//! Render callbacks supplied by the embedding UI.

use async_trait::async_trait;
use noteclaw_core::message::ChatMessage;

/// A user-visible notice raised when a turn ends abnormally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The user stopped generation.
    GenerationStopped,
    /// The bound model cannot call tools; switching agent or model helps.
    ToolsUnsupported { model: String },
    /// The model kept requesting tools past the round ceiling.
    ToolLoopExceeded { rounds: u32 },
    /// Any other failure.
    Error(String),
}

#[async_trait]
pub trait ChatView: Send + Sync {
    /// Re-render the whole visible transcript.
    async fn render_messages(&self, messages: &[&ChatMessage]);

    /// Patch only the last message (streaming updates).
    async fn update_last_message(&self, message: &ChatMessage);

    async fn show_typing_indicator(&self, agent_name: Option<&str>);

    async fn hide_typing_indicator(&self);

    async fn notify(&self, notice: Notice);
}

/// A view that ignores every callback. Useful for headless runs.
pub struct NullView;

#[async_trait]
impl ChatView for NullView {
    async fn render_messages(&self, _messages: &[&ChatMessage]) {}
    async fn update_last_message(&self, _message: &ChatMessage) {}
    async fn show_typing_indicator(&self, _agent_name: Option<&str>) {}
    async fn hide_typing_indicator(&self) {}
    async fn notify(&self, _notice: Notice) {}
}
