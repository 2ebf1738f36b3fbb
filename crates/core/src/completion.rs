use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl From<Role> for String {
    fn from(val: Role) -> Self {
        val.as_str().into()
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match &self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message of a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Failure reported by a completion backend.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("model '{0}' not found")]
    ModelNotFound(String),
    #[error("{0}")]
    Backend(String),
}

#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Identifier of the model on the backend.
    fn name(&self) -> &str;

    /// Sends `messages` to the backend and waits for the full reply.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}
