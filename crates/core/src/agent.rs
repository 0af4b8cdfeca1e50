//! Agent configuration and capability types.

use serde::{Deserialize, Serialize};

/// Built-in system prompt template used when an agent declares none.
pub const DEFAULT_PROMPT: &str = "You are {{agent.name}}, an assistant working inside the user's note vault.\n\
{{agent.description}}\n\
Today is {{date}}. Available tools: {{tools}}.\n\
Only use a tool when the user's request needs it, and say so when an operation is denied.";

/// The class of file operation a tool performs.
///
/// Selects both the capability list consulted in [`Permissions`] and the
/// tools an agent is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOperation {
    Read,
    Write,
    Create,
    Move,
    Delete,
}

impl FileOperation {
    pub const ALL: [FileOperation; 5] = [
        FileOperation::Read,
        FileOperation::Write,
        FileOperation::Create,
        FileOperation::Move,
        FileOperation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Create => "create",
            Self::Move => "move",
            Self::Delete => "delete",
        }
    }

    /// Operations that modify or remove existing notes.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Write | Self::Move | Self::Delete)
    }
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "create" => Ok(Self::Create),
            "move" => Ok(Self::Move),
            "delete" => Ok(Self::Delete),
            other => Err(format!("unknown file operation '{other}'")),
        }
    }
}

/// Capability lists: path-glob patterns per operation class.
///
/// An empty list disables that operation entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub read: Vec<String>,
    #[serde(default)]
    pub write: Vec<String>,
    #[serde(default)]
    pub create: Vec<String>,
    #[serde(default, rename = "move")]
    pub move_: Vec<String>,
    #[serde(default)]
    pub delete: Vec<String>,
}

impl Permissions {
    /// The pattern list governing `operation`.
    pub fn patterns(&self, operation: FileOperation) -> &[String] {
        match operation {
            FileOperation::Read => &self.read,
            FileOperation::Write => &self.write,
            FileOperation::Create => &self.create,
            FileOperation::Move => &self.move_,
            FileOperation::Delete => &self.delete,
        }
    }
}

/// Immutable-per-session snapshot of an agent definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent name; also its identity for hot-swap checks
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Provider adapter name (e.g. "openai", "ollama")
    pub provider: String,

    /// Model identifier passed to the provider
    pub model: String,

    /// Whether responses are streamed chunk by chunk
    pub stream: bool,

    /// System prompt template
    pub prompt: String,

    #[serde(default)]
    pub permissions: Permissions,

    /// Allow access to notes at the top level of the vault
    #[serde(default)]
    pub vault_root_access: bool,

    /// Ask before write/move/delete
    #[serde(default)]
    pub confirm_destructive: bool,
}

impl AgentConfig {
    /// A minimal agent with no capabilities.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
            description: String::new(),
            provider: "openai".into(),
            model: model.into(),
            stream: true,
            prompt: DEFAULT_PROMPT.into(),
            permissions: Permissions::default(),
            vault_root_access: false,
            confirm_destructive: false,
        }
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_root_access(mut self, allowed: bool) -> Self {
        self.vault_root_access = allowed;
        self
    }

    pub fn with_confirmation(mut self, confirm: bool) -> Self {
        self.confirm_destructive = confirm;
        self
    }

    /// Whether any pattern grants `operation`.
    pub fn grants(&self, operation: FileOperation) -> bool {
        !self.permissions.patterns(operation).is_empty()
    }

    /// Two configs describe the same agent when their names match.
    pub fn same_identity(&self, other: &AgentConfig) -> bool {
        self.name == other.name
    }
}
