//! # NoteClaw Core
//!
//! Domain types, traits, and error definitions for the NoteClaw vault agent.
//! This crate has **no framework dependencies**: it defines the domain model
//! that every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here (model provider, note store).
//! Implementations live in their respective crates or in the embedding
//! application, which keeps the agent loop testable with scripted fakes.

pub mod agent;
pub mod error;
pub mod message;
pub mod provider;
pub mod vault;

// Re-export key types at crate root for ergonomics
pub use agent::{AgentConfig, FileOperation, Permissions};
pub use error::{Error, PermissionError, ProviderError, Result, StoreError, ToolError};
pub use message::{ChatMessage, MessageToolCall, Role, SessionId};
pub use provider::{
    ChunkReceiver, GenerationSettings, Provider, ProviderRequest, ProviderResponse, StreamChunk,
    ToolDefinition, Usage,
};
pub use vault::{FileStore, VaultEntry};
