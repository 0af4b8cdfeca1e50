//! Vault tools for NoteClaw agents.
//!
//! Tools give an agent hands inside the vault: read, overwrite, create,
//! move and delete notes, and list folders. Each tool is gated on one
//! capability list of the agent and checks concrete paths through the
//! [`PermissionGuard`](noteclaw_security::PermissionGuard) before acting.

pub mod args;
pub mod create_file;
pub mod delete_file;
pub mod handler;
pub mod list_files;
pub mod move_file;
pub mod read_file;
pub mod tool;
pub mod write_file;

pub use args::ToolArgs;
pub use handler::{ToolHandler, result_payload};
pub use tool::{ConfirmRequest, Confirmer, Tool, ToolContext, ToolRegistry};

/// The built-in catalog, in the order tools are offered to the model.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(read_file::ReadFileTool));
    registry.register(Box::new(write_file::WriteFileTool));
    registry.register(Box::new(create_file::CreateFileTool));
    registry.register(Box::new(move_file::MoveFileTool));
    registry.register(Box::new(delete_file::DeleteFileTool));
    registry.register(Box::new(list_files::ListFilesTool));
    registry
}
