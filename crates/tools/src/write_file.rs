//! write_file: replace the content of an existing note.

use async_trait::async_trait;
use noteclaw_core::agent::FileOperation;
use noteclaw_core::error::ToolError;
use serde_json::{Value, json};

use crate::args::{ToolArgs, mismatch};
use crate::tool::{Tool, ToolContext, string_params};

pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Overwrite an existing note with new content. Use create_file for new notes."
    }

    fn parameters_schema(&self) -> Value {
        string_params(&[
            ("path", "Vault-relative path of the note to overwrite"),
            ("content", "The complete new content of the note"),
        ])
    }

    fn operation(&self) -> FileOperation {
        FileOperation::Write
    }

    async fn execute(&self, ctx: &ToolContext<'_>, args: ToolArgs) -> Result<Value, ToolError> {
        let ToolArgs::WriteFile(args) = args else {
            return Err(mismatch(self.name(), &args));
        };
        ctx.authorize(FileOperation::Write, &args.path)?;
        ctx.confirm(
            self.name(),
            FileOperation::Write,
            &args.path,
            format!("Overwrite \"{}\"", args.path),
        )
        .await?;

        ctx.store.modify(&args.path, &args.content).await?;
        Ok(json!({
            "success": true,
            "path": args.path,
            "bytes": args.content.len(),
        }))
    }
}
