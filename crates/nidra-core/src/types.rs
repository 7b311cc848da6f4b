//! Conversation data model shared by the compactor and the daemon's
//! consolidation handlers.

use serde::{Deserialize, Serialize};

/// Role of a message author.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    ToolResult,
}

/// A single content part. Tagged union — new part kinds are added here,
/// not by overloading an existing variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    Image { media_type: String, data: String },
    ToolCall { id: String, name: String, arguments: serde_json::Value },
    ToolResult { id: String, output: String },
    Thinking { text: String },
}

impl ContentPart {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text { text: s.into() }
    }

    /// Best-effort plain-text view, used by the scoring primitives which
    /// only reason about tokens, not structure.
    pub fn as_text(&self) -> String {
        match self {
            ContentPart::Text { text } => text.clone(),
            ContentPart::Thinking { text } => text.clone(),
            ContentPart::ToolCall { name, arguments, .. } => {
                format!("{name}({arguments})")
            }
            ContentPart::ToolResult { output, .. } => output.clone(),
            ContentPart::Image { .. } => String::new(),
        }
    }
}

/// A message in conversation history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: Vec<ContentPart>,
    pub timestamp_ms: i64,
}

impl Message {
    pub fn new(id: impl Into<String>, role: Role, timestamp_ms: i64) -> Self {
        Self { id: id.into(), role, content: Vec::new(), timestamp_ms }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(ContentPart::text(text));
        self
    }

    /// Concatenation of every text-bearing content part, used as the
    /// document fed to the scoring primitives.
    pub fn as_text(&self) -> String {
        self.content
            .iter()
            .map(ContentPart::as_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Collaborator contract: the compactor needs a token estimate per message
/// and the provider's context-window limit, but the wire format that
/// produces those numbers belongs to the caller, not the core.
pub trait TokenEstimator: Send + Sync {
    fn estimate(&self, message: &Message) -> usize;
    fn context_limit(&self) -> usize;
}

/// A simple chars/4 estimator, good enough as a default/test double.
#[derive(Clone, Copy, Debug)]
pub struct CharsPerTokenEstimator {
    pub chars_per_token: f64,
    pub limit: usize,
}

impl CharsPerTokenEstimator {
    pub fn new(limit: usize) -> Self {
        Self { chars_per_token: 4.0, limit }
    }
}

impl TokenEstimator for CharsPerTokenEstimator {
    fn estimate(&self, message: &Message) -> usize {
        let chars: usize = message.as_text().len();
        ((chars as f64) / self.chars_per_token).ceil() as usize + 4
    }

    fn context_limit(&self) -> usize {
        self.limit
    }
}
