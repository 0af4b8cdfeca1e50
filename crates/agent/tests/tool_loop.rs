//! Scenario tests for the agent loop, driven by a scripted provider.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use noteclaw_agent::{AgentOrchestrator, ChatManager, ChatView, Notice, TurnLogger, TurnRecord};
use noteclaw_core::agent::{AgentConfig, Permissions};
use noteclaw_core::error::{Error, ProviderError};
use noteclaw_core::message::{ChatMessage, MessageToolCall, Role};
use noteclaw_core::provider::{
    ChunkReceiver, Provider, ProviderRequest, ProviderResponse, StreamChunk, Usage,
};
use noteclaw_tools::ToolHandler;
use noteclaw_vault::InMemoryVault;
use tokio::sync::{Notify, mpsc};
use tokio_util::sync::CancellationToken;

// ── Scripted provider ───────────────────────────────────────────────────

enum Round {
    /// Complete response with text.
    Text(&'static str, Option<Usage>),
    /// Tool calls, then (when streamed) nothing else.
    Tools(Vec<MessageToolCall>),
    /// Streamed deltas followed by a finish chunk.
    Chunks(Vec<&'static str>),
    /// Send these deltas, then wait for cancellation.
    Hang(Vec<&'static str>),
    Fail(ProviderError),
}

struct ScriptedProvider {
    script: Mutex<VecDeque<Round>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(script: Vec<Round>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request(&self, index: usize) -> ProviderRequest {
        self.requests.lock().unwrap()[index].clone()
    }

    fn next(&self, request: ProviderRequest) -> Round {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("provider called more often than scripted")
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        request: ProviderRequest,
        cancel: CancellationToken,
    ) -> Result<ProviderResponse, ProviderError> {
        match self.next(request) {
            Round::Text(text, usage) => Ok(ProviderResponse {
                text: text.into(),
                usage,
                ..ProviderResponse::default()
            }),
            Round::Tools(calls) => Ok(ProviderResponse::tool_calls(calls)),
            Round::Chunks(parts) => Ok(ProviderResponse::text(parts.concat())),
            Round::Hang(_) => {
                cancel.cancelled().await;
                Err(ProviderError::Cancelled)
            }
            Round::Fail(e) => Err(e),
        }
    }

    async fn stream(
        &self,
        request: ProviderRequest,
        cancel: CancellationToken,
    ) -> Result<ChunkReceiver, ProviderError> {
        let (tx, rx) = mpsc::channel(8);
        match self.next(request) {
            Round::Text(text, usage) => {
                tokio::spawn(async move {
                    let _ = tx.send(Ok(StreamChunk::delta(text))).await;
                    let _ = tx.send(Ok(StreamChunk::finish(vec![], usage))).await;
                });
            }
            Round::Tools(calls) => {
                tokio::spawn(async move {
                    let _ = tx.send(Ok(StreamChunk::finish(calls, None))).await;
                });
            }
            Round::Chunks(parts) => {
                tokio::spawn(async move {
                    for part in parts {
                        let _ = tx.send(Ok(StreamChunk::delta(part))).await;
                    }
                    let _ = tx.send(Ok(StreamChunk::finish(vec![], None))).await;
                });
            }
            Round::Hang(parts) => {
                tokio::spawn(async move {
                    for part in parts {
                        if tx.send(Ok(StreamChunk::delta(part))).await.is_err() {
                            return;
                        }
                    }
                    tokio::select! {
                        _ = cancel.cancelled() => {}
                        _ = tx.closed() => {}
                    }
                });
            }
            Round::Fail(e) => return Err(e),
        }
        Ok(rx)
    }
}

// ── Recording view ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum ViewEvent {
    /// Full render; carries the content of the last visible message.
    Render(Option<String>),
    Update(String),
    ShowTyping,
    HideTyping,
    Notice(Notice),
}

#[derive(Clone, Copy)]
enum Signal {
    Never,
    OnTyping,
    OnFirstContent,
}

struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
    signal: Signal,
    ready: Arc<Notify>,
}

impl RecordingView {
    fn new() -> Arc<Self> {
        Self::signalling(Signal::Never)
    }

    fn signalling(signal: Signal) -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            signal,
            ready: Arc::new(Notify::new()),
        })
    }

    fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    fn renders_and_updates(&self) -> Vec<ViewEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, ViewEvent::Render(_) | ViewEvent::Update(_)))
            .collect()
    }

    fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ChatView for RecordingView {
    async fn render_messages(&self, messages: &[&ChatMessage]) {
        let last = messages.last().map(|m| m.content.clone());
        if matches!(self.signal, Signal::OnFirstContent)
            && messages
                .last()
                .is_some_and(|m| m.role == Role::Assistant && !m.content.is_empty())
        {
            self.ready.notify_one();
        }
        self.push(ViewEvent::Render(last));
    }

    async fn update_last_message(&self, message: &ChatMessage) {
        self.push(ViewEvent::Update(message.content.clone()));
    }

    async fn show_typing_indicator(&self, _agent_name: Option<&str>) {
        if matches!(self.signal, Signal::OnTyping) {
            self.ready.notify_one();
        }
        self.push(ViewEvent::ShowTyping);
    }

    async fn hide_typing_indicator(&self) {
        self.push(ViewEvent::HideTyping);
    }

    async fn notify(&self, notice: Notice) {
        self.push(ViewEvent::Notice(notice));
    }
}

#[derive(Default)]
struct RecordingLogger {
    turns: Mutex<Vec<TurnRecord>>,
}

#[async_trait]
impl TurnLogger for RecordingLogger {
    async fn log_turn(&self, record: TurnRecord) {
        self.turns.lock().unwrap().push(record);
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

fn vault() -> Arc<ToolHandler> {
    Arc::new(ToolHandler::new(Arc::new(InMemoryVault::with_notes([
        ("n.md", "note body"),
        ("Notes/plan.md", "the plan"),
    ]))))
}

fn agent(stream: bool) -> AgentConfig {
    AgentConfig::new("Librarian", "test-model")
        .with_streaming(stream)
        .with_root_access(true)
        .with_permissions(Permissions {
            read: vec!["/".into()],
            ..Permissions::default()
        })
}

fn session(tools: &Arc<ToolHandler>, config: AgentConfig) -> ChatManager {
    let mut chat = ChatManager::new().with_tools(tools.clone());
    chat.start_session(config);
    chat
}

fn roles(chat: &ChatManager) -> Vec<Role> {
    chat.messages().iter().map(|m| m.role).collect()
}

fn read_call(id: &str, path: &str) -> MessageToolCall {
    MessageToolCall::new(id, "read_file", format!(r#"{{"path":"{path}"}}"#))
}

// ── Scenarios ───────────────────────────────────────────────────────────

#[tokio::test]
async fn streaming_renders_once_then_updates_incrementally() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![Round::Chunks(vec!["He", "llo"])]);
    let view = RecordingView::new();
    let logger = Arc::new(RecordingLogger::default());
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone())
        .with_logger(logger.clone());
    let mut chat = session(&tools, agent(true));

    orchestrator.handle_user_message(&mut chat, "hi").await.unwrap();

    assert_eq!(
        view.renders_and_updates(),
        vec![
            ViewEvent::Render(Some("hi".into())),
            ViewEvent::Render(Some("He".into())),
            ViewEvent::Update("Hello".into()),
        ]
    );
    assert_eq!(chat.last_message().unwrap().content, "Hello");
    assert_eq!(roles(&chat), [Role::System, Role::User, Role::Assistant]);
    assert!(provider.request(0).stream);

    let turns = logger.turns.lock().unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].user_message, "hi");
    assert_eq!(turns[0].assistant_message, "Hello");
    assert!(turns[0].new_session);
}

#[tokio::test]
async fn tool_loop_appends_results_and_stops_on_text() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![
        Round::Tools(vec![read_call("call_1", "n.md")]),
        Round::Text("The note says: note body", None),
    ]);
    let view = RecordingView::new();
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone());
    let mut chat = session(&tools, agent(false));

    orchestrator
        .handle_user_message(&mut chat, "what is in n.md?")
        .await
        .unwrap();

    assert_eq!(provider.calls(), 2);
    assert_eq!(
        roles(&chat),
        [Role::System, Role::User, Role::Assistant, Role::Tool, Role::Assistant]
    );
    let log = chat.messages();
    assert_eq!(log[2].tool_calls[0].id, "call_1");
    assert_eq!(log[3].tool_call_id.as_deref(), Some("call_1"));
    assert_eq!(log[3].name.as_deref(), Some("read_file"));
    let payload: serde_json::Value = serde_json::from_str(&log[3].content).unwrap();
    assert_eq!(payload["success"], true);
    assert_eq!(payload["content"], "note body");
    assert_eq!(log[4].content, "The note says: note body");

    let offered: Vec<String> = provider.request(0).tools.into_iter().map(|t| t.name).collect();
    assert_eq!(offered, ["read_file", "list_files"]);
    assert_eq!(provider.request(1).messages.len(), 4);
    assert!(view.notices().is_empty());
}

#[tokio::test]
async fn streamed_tool_calls_attach_to_placeholder() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![
        Round::Tools(vec![read_call("c1", "n.md")]),
        Round::Chunks(vec!["Done"]),
    ]);
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), RecordingView::new());
    let mut chat = session(&tools, agent(true));

    orchestrator.handle_user_message(&mut chat, "read it").await.unwrap();

    assert_eq!(
        roles(&chat),
        [Role::System, Role::User, Role::Assistant, Role::Tool, Role::Assistant]
    );
    assert!(chat.messages()[2].content.is_empty());
    assert_eq!(chat.messages()[2].tool_calls.len(), 1);
    assert_eq!(chat.messages()[4].content, "Done");
}

#[tokio::test]
async fn denied_tool_call_is_reported_and_loop_continues() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![
        Round::Tools(vec![
            MessageToolCall::new("w1", "write_file", r#"{"path":"n.md","content":"x"}"#),
            MessageToolCall::new("u1", "teleport", "{}"),
            read_call("r1", "../etc/passwd"),
        ]),
        Round::Text("I cannot do that.", None),
    ]);
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), RecordingView::new());
    let mut chat = session(&tools, agent(false));

    orchestrator.handle_user_message(&mut chat, "edit n.md").await.unwrap();

    let kinds: Vec<String> = chat
        .messages()
        .iter()
        .filter(|m| m.role == Role::Tool)
        .map(|m| {
            let payload: serde_json::Value = serde_json::from_str(&m.content).unwrap();
            assert_eq!(payload["success"], false);
            payload["kind"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds, ["unavailable", "tool_not_found", "permission_denied"]);
    assert_eq!(chat.last_assistant_text(), Some("I cannot do that."));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn abort_mid_stream_keeps_partial_text_and_stops_cleanly() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![Round::Hang(vec!["He"])]);
    let view = RecordingView::signalling(Signal::OnFirstContent);
    let logger = Arc::new(RecordingLogger::default());
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone())
        .with_logger(logger.clone());
    let mut chat = session(&tools, agent(true));

    let ready = view.ready.clone();
    let (result, aborted) = tokio::join!(
        orchestrator.handle_user_message(&mut chat, "hi"),
        async {
            ready.notified().await;
            orchestrator.abort_generation()
        }
    );

    assert!(aborted);
    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(roles(&chat), [Role::System, Role::User, Role::Assistant]);
    assert_eq!(chat.last_message().unwrap().content, "He");
    assert!(!chat.last_message().unwrap().is_empty_placeholder());
    assert_eq!(view.notices(), [Notice::GenerationStopped]);
    assert_eq!(view.events().last(), Some(&ViewEvent::Notice(Notice::GenerationStopped)));
    assert!(view.events().contains(&ViewEvent::HideTyping));
    assert!(logger.turns.lock().unwrap().is_empty());
    assert!(!orchestrator.is_busy());
}

#[tokio::test]
async fn abort_before_first_chunk_removes_placeholder() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![Round::Hang(vec![])]);
    let view = RecordingView::signalling(Signal::OnTyping);
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone());
    let mut chat = session(&tools, agent(true));

    let ready = view.ready.clone();
    let (result, _) = tokio::join!(
        orchestrator.handle_user_message(&mut chat, "hi"),
        async {
            ready.notified().await;
            orchestrator.abort_generation()
        }
    );

    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(roles(&chat), [Role::System, Role::User]);
    assert_eq!(view.notices(), [Notice::GenerationStopped]);
}

#[tokio::test]
async fn abort_during_non_streaming_call() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![Round::Hang(vec![])]);
    let view = RecordingView::signalling(Signal::OnTyping);
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone());
    let mut chat = session(&tools, agent(false));

    let ready = view.ready.clone();
    let (result, _) = tokio::join!(
        orchestrator.handle_user_message(&mut chat, "hi"),
        async {
            ready.notified().await;
            orchestrator.abort_generation()
        }
    );

    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(roles(&chat), [Role::System, Role::User]);
    assert_eq!(view.notices(), [Notice::GenerationStopped]);
}

#[tokio::test]
async fn round_ceiling_stops_runaway_tool_requests() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![
        Round::Tools(vec![read_call("a", "n.md")]),
        Round::Tools(vec![read_call("b", "n.md")]),
        Round::Tools(vec![read_call("c", "n.md")]),
    ]);
    let view = RecordingView::new();
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone())
        .with_max_rounds(2);
    let mut chat = session(&tools, agent(true));

    let result = orchestrator.handle_user_message(&mut chat, "loop").await;

    assert!(matches!(result, Err(Error::ToolLoopExceeded { rounds: 2 })));
    assert_eq!(provider.calls(), 2);
    assert_eq!(view.notices(), [Notice::ToolLoopExceeded { rounds: 2 }]);
    let tool_results = chat.messages().iter().filter(|m| m.role == Role::Tool).count();
    assert_eq!(tool_results, 2);
    assert_eq!(chat.last_message().unwrap().role, Role::Tool);
}

#[tokio::test]
async fn tools_unsupported_gets_its_own_notice() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![Round::Fail(ProviderError::ToolsUnsupported {
        model: "test-model".into(),
    })]);
    let view = RecordingView::new();
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone());
    let mut chat = session(&tools, agent(true));

    let result = orchestrator.handle_user_message(&mut chat, "hi").await;

    assert!(matches!(
        result,
        Err(Error::Provider(ProviderError::ToolsUnsupported { .. }))
    ));
    assert_eq!(roles(&chat), [Role::System, Role::User]);
    assert_eq!(
        view.notices(),
        [Notice::ToolsUnsupported {
            model: "test-model".into()
        }]
    );
}

#[tokio::test]
async fn provider_failure_rolls_back_placeholder() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![Round::Fail(ProviderError::Network(
        "connection reset".into(),
    ))]);
    let view = RecordingView::new();
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone());
    let mut chat = session(&tools, agent(true));

    let result = orchestrator.handle_user_message(&mut chat, "hi").await;

    assert!(matches!(result, Err(Error::Provider(ProviderError::Network(_)))));
    assert_eq!(roles(&chat), [Role::System, Role::User]);
    let notices = view.notices();
    assert_eq!(notices.len(), 1);
    assert!(matches!(&notices[0], Notice::Error(msg) if msg.contains("connection reset")));
    assert!(!orchestrator.is_busy());
}

#[tokio::test]
async fn second_turn_while_busy_is_rejected() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![Round::Hang(vec![])]);
    let view = RecordingView::signalling(Signal::OnTyping);
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone());
    let mut first = session(&tools, agent(true));
    let mut second = session(&tools, agent(true));

    let ready = view.ready.clone();
    let (first_result, second_result) = tokio::join!(
        orchestrator.handle_user_message(&mut first, "one"),
        async {
            ready.notified().await;
            let result = orchestrator.handle_user_message(&mut second, "two").await;
            orchestrator.abort_generation();
            result
        }
    );

    assert!(matches!(second_result, Err(Error::Busy)));
    assert!(matches!(first_result, Err(Error::Cancelled)));
    assert_eq!(roles(&second), [Role::System]);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn blank_text_or_missing_session_is_ignored() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![]);
    let view = RecordingView::new();
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone());

    let mut chat = session(&tools, agent(true));
    orchestrator.handle_user_message(&mut chat, "   \n").await.unwrap();
    assert_eq!(roles(&chat), [Role::System]);

    let mut empty = ChatManager::new();
    orchestrator.handle_user_message(&mut empty, "hello").await.unwrap();
    assert!(empty.messages().is_empty());

    assert_eq!(provider.calls(), 0);
    assert!(view.events().is_empty());
}

#[tokio::test]
async fn turns_log_final_round_usage_and_session_flag() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![
        Round::Text("first", Some(Usage::new(10, 2))),
        Round::Tools(vec![read_call("c1", "n.md")]),
        Round::Text("second", Some(Usage::new(30, 4))),
    ]);
    let logger = Arc::new(RecordingLogger::default());
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), RecordingView::new())
        .with_logger(logger.clone());
    let mut chat = session(&tools, agent(false));

    orchestrator.handle_user_message(&mut chat, "one").await.unwrap();
    orchestrator.handle_user_message(&mut chat, "two").await.unwrap();

    let turns = logger.turns.lock().unwrap();
    assert_eq!(turns.len(), 2);
    assert!(turns[0].new_session);
    assert!(!turns[1].new_session);
    assert_eq!(turns[1].assistant_message, "second");
    assert_eq!(turns[1].usage, Some(Usage::new(30, 4)));
    assert_eq!(turns[0].session_id, turns[1].session_id);
    assert_eq!(chat.usage().total_tokens, 46);
}

#[tokio::test]
async fn references_are_expanded_into_user_message() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![Round::Text("ok", None)]);
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), RecordingView::new());
    let mut chat = session(&tools, agent(false));

    orchestrator
        .handle_user_message(&mut chat, "summarize [[Notes/plan]]")
        .await
        .unwrap();

    let user = &chat.messages()[1];
    assert!(user.content.starts_with("summarize [[Notes/plan]]"));
    assert!(user.content.contains("the plan"));
    assert_eq!(provider.request(0).messages[1].content, user.content);
}

#[tokio::test]
async fn empty_stream_leaves_no_placeholder() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![Round::Chunks(vec![])]);
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), RecordingView::new());
    let mut chat = session(&tools, agent(true));

    orchestrator.handle_user_message(&mut chat, "hi").await.unwrap();

    assert_eq!(roles(&chat), [Role::System, Role::User]);
}

#[tokio::test]
async fn turn_without_reply_logs_empty_assistant_message() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![
        Round::Chunks(vec!["First answer"]),
        Round::Chunks(vec![]),
    ]);
    let logger = Arc::new(RecordingLogger::default());
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), RecordingView::new())
        .with_logger(logger.clone());
    let mut chat = session(&tools, agent(true));

    orchestrator.handle_user_message(&mut chat, "one").await.unwrap();
    orchestrator.handle_user_message(&mut chat, "two").await.unwrap();

    let turns = logger.turns.lock().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].assistant_message, "First answer");
    assert_eq!(turns[1].user_message, "two");
    assert_eq!(turns[1].assistant_message, "");
}

#[tokio::test]
async fn empty_non_streaming_reply_logs_empty_assistant_message() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![Round::Text("earlier", None), Round::Text("", None)]);
    let logger = Arc::new(RecordingLogger::default());
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), RecordingView::new())
        .with_logger(logger.clone());
    let mut chat = session(&tools, agent(false));

    orchestrator.handle_user_message(&mut chat, "one").await.unwrap();
    orchestrator.handle_user_message(&mut chat, "two").await.unwrap();

    let turns = logger.turns.lock().unwrap();
    assert_eq!(turns[1].assistant_message, "");
    assert_eq!(roles(&chat), [Role::System, Role::User, Role::Assistant, Role::User]);
}

#[tokio::test]
async fn typing_indicator_is_hidden_once_per_streamed_round() {
    let tools = vault();
    let provider = ScriptedProvider::new(vec![
        Round::Tools(vec![read_call("c1", "n.md")]),
        Round::Chunks(vec!["He", "llo"]),
    ]);
    let view = RecordingView::new();
    let orchestrator = AgentOrchestrator::new(provider.clone(), tools.clone(), view.clone());
    let mut chat = session(&tools, agent(true));

    orchestrator.handle_user_message(&mut chat, "hi").await.unwrap();

    let typing: Vec<ViewEvent> = view
        .events()
        .into_iter()
        .filter(|e| matches!(e, ViewEvent::ShowTyping | ViewEvent::HideTyping))
        .collect();
    assert_eq!(
        typing,
        vec![
            ViewEvent::ShowTyping,
            ViewEvent::HideTyping,
            ViewEvent::ShowTyping,
            ViewEvent::HideTyping,
        ]
    );
}
