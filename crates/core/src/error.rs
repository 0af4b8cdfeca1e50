//! Error types for the NoteClaw domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use crate::agent::FileOperation;
use thiserror::Error;

/// The top-level error type for all NoteClaw operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Note store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Session state errors ---
    #[error("Session error: {0}")]
    Session(String),

    // --- Turn control ---
    #[error("Generation stopped by user")]
    Cancelled,

    #[error("Tool loop exceeded {rounds} rounds without a final answer")]
    ToolLoopExceeded { rounds: u32 },

    #[error("A turn is already in progress for this session")]
    Busy,

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Model '{model}' does not support tool calling")]
    ToolsUnsupported { model: String },

    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request cancelled")]
    Cancelled,
}

/// A denied operation on a path, carried for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Agent '{agent}' is not permitted to {operation} {}", .path.as_deref().unwrap_or("(any path)"))]
pub struct PermissionError {
    pub agent: String,
    pub operation: FileOperation,
    pub path: Option<String>,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool '{tool_name}' is not available to agent '{agent}'")]
    Unavailable { tool_name: String, agent: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(#[from] PermissionError),

    #[error("Declined by user: {tool_name} on {path}")]
    Declined { tool_name: String, path: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

impl ToolError {
    /// Short machine-readable category, reported back to the model.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "tool_not_found",
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::Unavailable { .. } => "unavailable",
            Self::PermissionDenied(_) => "permission_denied",
            Self::Declined { .. } => "declined",
            Self::Store(_) => "store",
            Self::ExecutionFailed { .. } => "execution_failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Note already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("I/O error on '{path}': {reason}")]
    Io { path: String, reason: String },
}
