//! The tool-calling loop.
//!
//! One [`AgentOrchestrator::handle_user_message`] call:
//!
//! 1. **Record** the user text, with `[[references]]` expanded
//! 2. **Send** the whole log to the provider, streaming when the agent asks for it
//! 3. **If tool calls**: run each in order through the [`ToolHandler`], append
//!    one tool message per call, loop back to step 2
//! 4. **If text only**: log the turn and return
//!
//! A single cancellation token covers the whole call. Every exit path leaves
//! the log without an empty assistant placeholder.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use noteclaw_config::ChatConfig;
use noteclaw_core::agent::AgentConfig;
use noteclaw_core::error::{Error, ProviderError, Result};
use noteclaw_core::message::ChatMessage;
use noteclaw_core::provider::{
    GenerationSettings, Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage,
};
use noteclaw_tools::ToolHandler;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chat::ChatManager;
use crate::references::expand_references;
use crate::turn_log::{TurnLogger, TurnRecord};
use crate::view::{ChatView, Notice};

const DEFAULT_MAX_ROUNDS: u32 = 25;
const DEFAULT_MAX_REFERENCE_BYTES: usize = 20_000;

pub struct AgentOrchestrator {
    provider: Arc<dyn Provider>,
    tools: Arc<ToolHandler>,
    view: Arc<dyn ChatView>,
    logger: Option<Arc<dyn TurnLogger>>,
    settings: GenerationSettings,
    max_rounds: u32,
    max_reference_bytes: usize,
    busy: AtomicBool,
    cancel: Mutex<Option<CancellationToken>>,
}

/// Marks the orchestrator busy for as long as it lives.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct TurnOutcome {
    user_message: String,
    /// Empty when no round of this turn produced text
    assistant_message: String,
    usage: Option<Usage>,
    rounds: u32,
}

impl AgentOrchestrator {
    pub fn new(
        provider: Arc<dyn Provider>,
        tools: Arc<ToolHandler>,
        view: Arc<dyn ChatView>,
    ) -> Self {
        Self {
            provider,
            tools,
            view,
            logger: None,
            settings: GenerationSettings::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_reference_bytes: DEFAULT_MAX_REFERENCE_BYTES,
            busy: AtomicBool::new(false),
            cancel: Mutex::new(None),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn TurnLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Provider calls allowed per turn before the loop gives up.
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds.max(1);
        self
    }

    pub fn with_max_reference_bytes(mut self, bytes: usize) -> Self {
        self.max_reference_bytes = bytes;
        self
    }

    /// Apply the `[chat]` section of the application config.
    pub fn with_chat_config(self, chat: &ChatConfig) -> Self {
        self.with_settings(chat.generation_settings())
            .with_max_rounds(chat.max_tool_rounds)
            .with_max_reference_bytes(chat.max_reference_bytes)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Cancel the turn in flight, if any. Returns whether one was running.
    pub fn abort_generation(&self) -> bool {
        match self.lock_cancel().as_ref() {
            Some(token) => {
                info!("Generation abort requested");
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Process one user message against the active session of `chat`.
    ///
    /// Does nothing when there is no active session or `text` is blank.
    /// Fails with [`Error::Busy`] while another turn is running.
    pub async fn handle_user_message(&self, chat: &mut ChatManager, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }
        let Some(config) = chat
            .active_agent()
            .filter(|_| chat.has_active_session())
            .cloned()
        else {
            return Ok(());
        };

        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            warn!(agent = %config.name, "Turn rejected, another one is in flight");
            return Err(Error::Busy);
        };

        let token = CancellationToken::new();
        *self.lock_cancel() = Some(token.clone());
        let result = self.run_turn(chat, &config, text, &token).await;
        *self.lock_cancel() = None;

        match result {
            Ok(outcome) => {
                info!(agent = %config.name, rounds = outcome.rounds, "Turn completed");
                self.log_turn(chat, &config, outcome).await;
                Ok(())
            }
            Err(e) => Err(self.fail(chat, &config, e).await),
        }
    }

    async fn run_turn(
        &self,
        chat: &mut ChatManager,
        config: &AgentConfig,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<TurnOutcome> {
        let user_message =
            expand_references(text, config, &self.tools, self.max_reference_bytes).await;
        let turn_start = chat.messages().len();
        chat.add_message(ChatMessage::user(user_message.clone()))?;
        self.view.render_messages(&chat.get_visible_messages()).await;

        let definitions = self.tools.definitions_for(config);
        let mut rounds = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            if rounds >= self.max_rounds {
                return Err(Error::ToolLoopExceeded { rounds });
            }
            rounds += 1;
            debug!(agent = %config.name, round = rounds, "Agent loop round");

            let request = self.request(chat, config, &definitions);
            let response = if config.stream {
                self.stream_round(chat, config, request, cancel).await?
            } else {
                self.complete_round(chat, config, request, cancel).await?
            };

            if let Some(usage) = response.usage {
                chat.record_usage(usage);
            }
            if response.tool_calls.is_empty() {
                return Ok(TurnOutcome {
                    user_message,
                    assistant_message: chat
                        .last_assistant_text_since(turn_start)
                        .unwrap_or_default()
                        .to_string(),
                    usage: response.usage,
                    rounds,
                });
            }

            debug!(tool_count = response.tool_calls.len(), "Executing tool calls");
            for call in &response.tool_calls {
                let content = self.tools.execute_call(config, call).await;
                chat.add_message(ChatMessage::tool_result(&call.id, &call.name, content))?;
            }
            self.view.render_messages(&chat.get_visible_messages()).await;
        }
    }

    fn request(
        &self,
        chat: &ChatManager,
        config: &AgentConfig,
        definitions: &[ToolDefinition],
    ) -> ProviderRequest {
        ProviderRequest {
            model: config.model.clone(),
            messages: chat.messages().to_vec(),
            tools: definitions.to_vec(),
            stream: config.stream,
            settings: self.settings.clone(),
        }
    }

    async fn complete_round(
        &self,
        chat: &mut ChatManager,
        config: &AgentConfig,
        request: ProviderRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderResponse> {
        self.view.show_typing_indicator(Some(&config.name)).await;
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            response = self.provider.complete(request, cancel.clone()) => {
                response.map_err(provider_error)
            }
        };
        self.view.hide_typing_indicator().await;
        let response = result?;

        if response.text.is_empty() && response.tool_calls.is_empty() {
            warn!(agent = %config.name, "Provider returned an empty response");
            return Ok(response);
        }
        chat.add_message(ChatMessage::assistant_with_tools(
            response.text.clone(),
            response.tool_calls.clone(),
        ))?;
        self.view.render_messages(&chat.get_visible_messages()).await;
        Ok(response)
    }

    async fn stream_round(
        &self,
        chat: &mut ChatManager,
        config: &AgentConfig,
        request: ProviderRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderResponse> {
        chat.add_message(ChatMessage::assistant(""))?;
        self.view.show_typing_indicator(Some(&config.name)).await;

        let opened = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            rx = self.provider.stream(request, cancel.clone()) => rx.map_err(provider_error),
        };
        let mut rx = opened?;

        let mut response = ProviderResponse {
            model: config.model.clone(),
            ..ProviderResponse::default()
        };
        let mut rendered = false;
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                next = rx.recv() => next,
            };
            let chunk = match next {
                None => break,
                Some(chunk) => chunk.map_err(provider_error)?,
            };

            if let Some(delta) = chunk.content.as_deref().filter(|d| !d.is_empty())
                && chat.append_chunk_to_last_message(delta)
            {
                response.text.push_str(delta);
                if rendered {
                    if let Some(last) = chat.last_message() {
                        self.view.update_last_message(last).await;
                    }
                } else {
                    rendered = true;
                    self.view.hide_typing_indicator().await;
                    self.view.render_messages(&chat.get_visible_messages()).await;
                }
            }
            response.tool_calls.extend(chunk.tool_calls);
            if chunk.usage.is_some() {
                response.usage = chunk.usage;
            }
            if chunk.done {
                break;
            }
        }
        if !rendered {
            self.view.hide_typing_indicator().await;
        }

        if !response.tool_calls.is_empty() {
            chat.attach_tool_calls(response.tool_calls.clone());
            self.view.render_messages(&chat.get_visible_messages()).await;
        } else if chat.remove_empty_placeholder() {
            warn!(agent = %config.name, "Stream ended without content");
            self.view.render_messages(&chat.get_visible_messages()).await;
        }
        Ok(response)
    }

    /// Clean up after a failed turn and surface one notice.
    async fn fail(&self, chat: &mut ChatManager, config: &AgentConfig, error: Error) -> Error {
        self.view.hide_typing_indicator().await;
        if chat.remove_empty_placeholder() {
            self.view.render_messages(&chat.get_visible_messages()).await;
        }

        let notice = match &error {
            Error::Cancelled => {
                info!(agent = %config.name, "Generation stopped");
                Notice::GenerationStopped
            }
            Error::Provider(ProviderError::ToolsUnsupported { model }) => {
                warn!(agent = %config.name, model = %model, "Model does not support tools");
                Notice::ToolsUnsupported {
                    model: model.clone(),
                }
            }
            Error::ToolLoopExceeded { rounds } => {
                warn!(agent = %config.name, rounds = *rounds, "Tool loop ceiling reached");
                Notice::ToolLoopExceeded { rounds: *rounds }
            }
            other => {
                warn!(agent = %config.name, error = %other, "Turn failed");
                Notice::Error(other.to_string())
            }
        };
        self.view.notify(notice).await;
        error
    }

    async fn log_turn(&self, chat: &mut ChatManager, config: &AgentConfig, outcome: TurnOutcome) {
        let Some(logger) = &self.logger else {
            return;
        };
        let record = TurnRecord {
            session_id: chat.session_id().to_string(),
            agent: config.name.clone(),
            new_session: chat.take_new_session_flag(),
            user_message: outcome.user_message,
            assistant_message: outcome.assistant_message,
            usage: outcome.usage,
            timestamp: Utc::now(),
        };
        logger.log_turn(record).await;
    }

    // A poisoned lock still holds a usable token slot.
    fn lock_cancel(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.cancel.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn provider_error(error: ProviderError) -> Error {
    match error {
        ProviderError::Cancelled => Error::Cancelled,
        other => Error::Provider(other),
    }
}
