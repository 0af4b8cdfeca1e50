//! move_file: rename or relocate a note.
//!
//! Source and destination are checked against the `move` list separately;
//! both must be allowed.

use async_trait::async_trait;
use noteclaw_core::agent::FileOperation;
use noteclaw_core::error::ToolError;
use serde_json::{Value, json};

use crate::args::{ToolArgs, mismatch};
use crate::tool::{Tool, ToolContext, string_params};

pub struct MoveFileTool;

#[async_trait]
impl Tool for MoveFileTool {
    fn name(&self) -> &str {
        "move_file"
    }

    fn description(&self) -> &str {
        "Move or rename a note. Fails if the destination already exists."
    }

    fn parameters_schema(&self) -> Value {
        string_params(&[
            ("from", "Current vault-relative path of the note"),
            ("to", "New vault-relative path of the note"),
        ])
    }

    fn operation(&self) -> FileOperation {
        FileOperation::Move
    }

    async fn execute(&self, ctx: &ToolContext<'_>, args: ToolArgs) -> Result<Value, ToolError> {
        let ToolArgs::MoveFile(args) = args else {
            return Err(mismatch(self.name(), &args));
        };
        ctx.authorize(FileOperation::Move, &args.from)?;
        ctx.authorize(FileOperation::Move, &args.to)?;
        ctx.confirm(
            self.name(),
            FileOperation::Move,
            &args.from,
            format!("Move \"{}\" to \"{}\"", args.from, args.to),
        )
        .await?;

        ctx.store.rename(&args.from, &args.to).await?;
        Ok(json!({
            "success": true,
            "from": args.from,
            "to": args.to,
        }))
    }
}
