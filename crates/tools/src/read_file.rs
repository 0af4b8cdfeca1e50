//! read_file: return a note's full text.

use async_trait::async_trait;
use noteclaw_core::agent::FileOperation;
use noteclaw_core::error::ToolError;
use serde_json::{Value, json};

use crate::args::{ToolArgs, mismatch};
use crate::tool::{Tool, ToolContext, string_params};

pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the full text of a note in the vault."
    }

    fn parameters_schema(&self) -> Value {
        string_params(&[("path", "Vault-relative path of the note, e.g. Inbox/todo.md")])
    }

    fn operation(&self) -> FileOperation {
        FileOperation::Read
    }

    async fn execute(&self, ctx: &ToolContext<'_>, args: ToolArgs) -> Result<Value, ToolError> {
        let ToolArgs::ReadFile(args) = args else {
            return Err(mismatch(self.name(), &args));
        };
        ctx.authorize(FileOperation::Read, &args.path)?;

        let content = ctx.store.read(&args.path).await?;
        Ok(json!({
            "success": true,
            "path": args.path,
            "content": content,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn reads_permitted_note() {
        let fx = Fixture::reader(&[("Inbox/n.md", "hello")]);
        let args = ToolArgs::parse("read_file", r#"{"path":"Inbox/n.md"}"#).unwrap();
        let result = ReadFileTool.execute(&fx.ctx(), args).await.unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["content"], "hello");
    }

    #[tokio::test]
    async fn missing_note_is_store_error() {
        let fx = Fixture::reader(&[]);
        let args = ToolArgs::parse("read_file", r#"{"path":"Inbox/none.md"}"#).unwrap();
        let err = ReadFileTool.execute(&fx.ctx(), args).await.unwrap_err();
        assert_eq!(err.kind(), "store");
    }

    #[tokio::test]
    async fn path_outside_patterns_denied() {
        let fx = Fixture::reader(&[("Private/n.md", "secret")]);
        let args = ToolArgs::parse("read_file", r#"{"path":"Private/n.md"}"#).unwrap();
        let err = ReadFileTool.execute(&fx.ctx(), args).await.unwrap_err();
        assert!(matches!(err, ToolError::PermissionDenied(_)));
    }
}
