//! Turn logging collaborator.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use noteclaw_core::provider::Usage;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One completed `handle_user_message` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub session_id: String,
    pub agent: String,
    /// True for the first logged turn of a session.
    pub new_session: bool,
    pub user_message: String,
    pub assistant_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    pub timestamp: DateTime<Utc>,
}

#[async_trait]
pub trait TurnLogger: Send + Sync {
    async fn log_turn(&self, record: TurnRecord);
}

/// Writes each turn as a structured `tracing` event.
pub struct TracingTurnLogger;

#[async_trait]
impl TurnLogger for TracingTurnLogger {
    async fn log_turn(&self, record: TurnRecord) {
        info!(
            session_id = %record.session_id,
            agent = %record.agent,
            new_session = record.new_session,
            user_chars = record.user_message.chars().count(),
            assistant_chars = record.assistant_message.chars().count(),
            total_tokens = record.usage.map(|u| u.total_tokens),
            "Turn completed"
        );
    }
}
