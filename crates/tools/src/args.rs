//! Typed tool arguments.
//!
//! The model emits a raw JSON string per call. It is parsed once, at the
//! dispatch boundary, into the struct for the named tool; unknown fields,
//! missing required fields and blank paths are all argument errors.

use noteclaw_core::error::ToolError;
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathArgs {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentArgs {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoveArgs {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListArgs {
    #[serde(default)]
    pub folder: String,
}

/// Arguments for one tool call, tagged by tool name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolArgs {
    ReadFile(PathArgs),
    WriteFile(ContentArgs),
    CreateFile(ContentArgs),
    MoveFile(MoveArgs),
    DeleteFile(PathArgs),
    ListFiles(ListArgs),
}

impl ToolArgs {
    /// Parse `raw` as the arguments of `tool_name`.
    ///
    /// An empty string is read as `{}`.
    pub fn parse(tool_name: &str, raw: &str) -> Result<Self, ToolError> {
        let raw = if raw.trim().is_empty() { "{}" } else { raw };
        let args = match tool_name {
            "read_file" => Self::ReadFile(decode(tool_name, raw)?),
            "write_file" => Self::WriteFile(decode(tool_name, raw)?),
            "create_file" => Self::CreateFile(decode(tool_name, raw)?),
            "move_file" => Self::MoveFile(decode(tool_name, raw)?),
            "delete_file" => Self::DeleteFile(decode(tool_name, raw)?),
            "list_files" => Self::ListFiles(decode(tool_name, raw)?),
            other => return Err(ToolError::NotFound(other.to_string())),
        };
        args.validate()?;
        Ok(args)
    }

    /// The tool these arguments belong to.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::ReadFile(_) => "read_file",
            Self::WriteFile(_) => "write_file",
            Self::CreateFile(_) => "create_file",
            Self::MoveFile(_) => "move_file",
            Self::DeleteFile(_) => "delete_file",
            Self::ListFiles(_) => "list_files",
        }
    }

    fn validate(&self) -> Result<(), ToolError> {
        match self {
            Self::ReadFile(a) | Self::DeleteFile(a) => non_blank("path", &a.path),
            Self::WriteFile(a) | Self::CreateFile(a) => non_blank("path", &a.path),
            Self::MoveFile(a) => {
                non_blank("from", &a.from)?;
                non_blank("to", &a.to)
            }
            Self::ListFiles(_) => Ok(()),
        }
    }
}

/// Error for arguments routed to the wrong tool.
pub(crate) fn mismatch(expected: &str, got: &ToolArgs) -> ToolError {
    ToolError::InvalidArguments(format!(
        "{expected} received arguments for {}",
        got.tool_name()
    ))
}

fn decode<T: DeserializeOwned>(tool_name: &str, raw: &str) -> Result<T, ToolError> {
    serde_json::from_str(raw)
        .map_err(|e| ToolError::InvalidArguments(format!("{tool_name}: {e}")))
}

fn non_blank(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidArguments(format!(
            "'{field}' must not be empty"
        )));
    }
    Ok(())
}
