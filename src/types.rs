//! Shared types used across the quill runtime.
//!
//! The message and content-block shapes serialize exactly to the hosted
//! Messages API wire format, so they are used both as the in-memory
//! conversation history and as the request/response payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Conversation wire model
// ---------------------------------------------------------------------------

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in the multi-turn conversation. Content is an ordered
/// sequence of blocks; ordering is significant and preserved verbatim
/// when history is replayed to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// A user message holding a single text block.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// An assistant message with the given blocks.
    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content,
        }
    }

    /// A user message carrying tool results back to the model.
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: results,
        }
    }
}

/// One unit of message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Model-authored natural-language output.
    Text { text: String },
    /// A model-requested tool invocation.
    ToolUse { id: String, name: String, input: Value },
    /// The executor's serialized response, correlated to a prior
    /// `ToolUse` id from the immediately preceding assistant message.
    ToolResult { tool_use_id: String, content: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

/// Definition of a tool exposed to the model. `input_schema` is a JSON
/// Schema object declaring required/optional typed fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

// ---------------------------------------------------------------------------
// Model responses
// ---------------------------------------------------------------------------

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
    /// Forward compatibility with stop reasons this client predates.
    #[serde(other)]
    Other,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndTurn => write!(f, "end_turn"),
            Self::ToolUse => write!(f, "tool_use"),
            Self::MaxTokens => write!(f, "max_tokens"),
            Self::StopSequence => write!(f, "stop_sequence"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Token usage from a single model call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }

    /// Accumulate usage across the model calls of one request.
    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// A parsed model response: ordered content blocks plus the stop reason.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_block_serializes_to_wire_format() {
        let block = ContentBlock::ToolUse {
            id: "toolu_01".into(),
            name: "Read".into(),
            input: json!({"path": "/tmp/a.txt"}),
        };
        let wire = serde_json::to_string(&block).unwrap();
        assert!(wire.contains("\"type\":\"tool_use\""));
        assert!(wire.contains("\"name\":\"Read\""));

        let text = serde_json::to_string(&ContentBlock::text("hi")).unwrap();
        assert_eq!(text, r#"{"type":"text","text":"hi"}"#);
    }

    #[test]
    fn content_block_round_trips() {
        let wire = r#"{"type":"tool_result","tool_use_id":"toolu_9","content":"{\"ok\":true}"}"#;
        let block: ContentBlock = serde_json::from_str(wire).unwrap();
        assert_eq!(
            block,
            ContentBlock::tool_result("toolu_9", r#"{"ok":true}"#)
        );
    }

    #[test]
    fn unknown_stop_reason_is_tolerated() {
        let reason: StopReason = serde_json::from_str("\"pause_turn\"").unwrap();
        assert_eq!(reason, StopReason::Other);
    }

    #[test]
    fn message_roles_serialize_lowercase() {
        let msg = Message::user_text("hello");
        let wire = serde_json::to_string(&msg).unwrap();
        assert!(wire.contains("\"role\":\"user\""));
    }

    #[test]
    fn usage_accumulates() {
        let mut total = TokenUsage::default();
        total.add(TokenUsage { input_tokens: 100, output_tokens: 20 });
        total.add(TokenUsage { input_tokens: 300, output_tokens: 50 });
        assert_eq!(total.total(), 470);
    }
}
