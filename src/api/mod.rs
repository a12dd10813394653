//! Model API boundary.
//!
//! The conversation engine only ever sees the [`ModelClient`] trait; the
//! concrete HTTP implementation lives in [`client`].

pub mod client;

pub use client::AnthropicClient;

use crate::error::QuillError;
use crate::types::{Message, ModelResponse, ToolDefinition};
use async_trait::async_trait;

/// One model call: the full history plus tool schemas and a system
/// prompt go out, a parsed response comes back. Implementations must not
/// mutate the conversation; that is the engine's job.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ModelResponse, QuillError>;
}
