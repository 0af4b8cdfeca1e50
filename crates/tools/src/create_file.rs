//! create_file: add a new note.

use async_trait::async_trait;
use noteclaw_core::agent::FileOperation;
use noteclaw_core::error::ToolError;
use serde_json::{Value, json};

use crate::args::{ToolArgs, mismatch};
use crate::tool::{Tool, ToolContext, string_params};

pub struct CreateFileTool;

#[async_trait]
impl Tool for CreateFileTool {
    fn name(&self) -> &str {
        "create_file"
    }

    fn description(&self) -> &str {
        "Create a new note. Fails if a note already exists at the path."
    }

    fn parameters_schema(&self) -> Value {
        string_params(&[
            ("path", "Vault-relative path for the new note, e.g. Inbox/idea.md"),
            ("content", "Initial content of the note"),
        ])
    }

    fn operation(&self) -> FileOperation {
        FileOperation::Create
    }

    async fn execute(&self, ctx: &ToolContext<'_>, args: ToolArgs) -> Result<Value, ToolError> {
        let ToolArgs::CreateFile(args) = args else {
            return Err(mismatch(self.name(), &args));
        };
        ctx.authorize(FileOperation::Create, &args.path)?;

        ctx.store.create(&args.path, &args.content).await?;
        Ok(json!({
            "success": true,
            "path": args.path,
            "bytes": args.content.len(),
        }))
    }
}
