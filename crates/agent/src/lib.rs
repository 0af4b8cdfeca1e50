//! The NoteClaw agent loop.
//!
//! A conversation turn follows a **Send → Act → Observe** cycle:
//!
//! 1. **Receive** a user message and expand its `[[note]]` references
//! 2. **Send** the session log to the model provider
//! 3. **If tool calls**: run them through the permission-gated tool handler,
//!    append the results, loop back to step 2
//! 4. **If text only**: hand the turn to the turn logger
//!
//! The loop stops at the first round without tool calls, on cancellation, or
//! at the configured round ceiling.

pub mod chat;
pub mod orchestrator;
pub mod prompt;
pub mod references;
pub mod turn_log;
pub mod view;

pub use chat::ChatManager;
pub use orchestrator::AgentOrchestrator;
pub use prompt::render_prompt;
pub use references::{expand_references, extract_references};
pub use turn_log::{TracingTurnLogger, TurnLogger, TurnRecord};
pub use view::{ChatView, Notice, NullView};
