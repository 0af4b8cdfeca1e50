//! list_files: direct children of a folder.
//!
//! Gated on `read`. The folder itself must be one the `read` list reaches
//! into. Notes the agent may not read are left out, and so are sub-folders
//! holding nothing it could read.

use async_trait::async_trait;
use noteclaw_core::agent::FileOperation;
use noteclaw_core::error::ToolError;
use serde_json::{Value, json};

use crate::args::{ToolArgs, mismatch};
use crate::tool::{Tool, ToolContext};

pub struct ListFilesTool;

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List the notes and sub-folders directly inside a folder. Omit folder for the vault root."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "folder": {
                    "type": "string",
                    "description": "Vault-relative folder path; empty for the vault root"
                }
            },
            "required": [],
            "additionalProperties": false
        })
    }

    fn operation(&self) -> FileOperation {
        FileOperation::Read
    }

    async fn execute(&self, ctx: &ToolContext<'_>, args: ToolArgs) -> Result<Value, ToolError> {
        let ToolArgs::ListFiles(args) = args else {
            return Err(mismatch(self.name(), &args));
        };
        ctx.guard
            .assert_can_enter(ctx.config, FileOperation::Read, &args.folder)?;

        let entries = ctx.store.list(&args.folder).await?;
        let mut folders = Vec::new();
        let mut notes = Vec::new();
        for entry in entries {
            if entry.is_folder {
                if ctx
                    .guard
                    .can_enter(ctx.config, FileOperation::Read, &entry.path)
                {
                    folders.push(entry.path);
                }
            } else if ctx
                .guard
                .has_permission(ctx.config, FileOperation::Read, Some(&entry.path))
            {
                notes.push(entry.path);
            }
        }

        Ok(json!({
            "success": true,
            "folder": args.folder,
            "folders": folders,
            "files": notes,
        }))
    }
}
