//! delete_file: remove a note.

use async_trait::async_trait;
use noteclaw_core::agent::FileOperation;
use noteclaw_core::error::ToolError;
use serde_json::{Value, json};

use crate::args::{ToolArgs, mismatch};
use crate::tool::{Tool, ToolContext, string_params};

pub struct DeleteFileTool;

#[async_trait]
impl Tool for DeleteFileTool {
    fn name(&self) -> &str {
        "delete_file"
    }

    fn description(&self) -> &str {
        "Delete a note from the vault."
    }

    fn parameters_schema(&self) -> Value {
        string_params(&[("path", "Vault-relative path of the note to delete")])
    }

    fn operation(&self) -> FileOperation {
        FileOperation::Delete
    }

    async fn execute(&self, ctx: &ToolContext<'_>, args: ToolArgs) -> Result<Value, ToolError> {
        let ToolArgs::DeleteFile(args) = args else {
            return Err(mismatch(self.name(), &args));
        };
        ctx.authorize(FileOperation::Delete, &args.path)?;
        ctx.confirm(
            self.name(),
            FileOperation::Delete,
            &args.path,
            format!("Delete \"{}\"", args.path),
        )
        .await?;

        ctx.store.delete(&args.path).await?;
        Ok(json!({ "success": true, "path": args.path }))
    }
}
