//! The conversation turn loop.
//!
//! One user request drives the cycle: call the model with the running
//! history plus tool schemas, emit text blocks as they arrive, execute
//! any requested tools in order, append the paired assistant/tool-result
//! messages, and repeat until the model stops asking for tools.

use crate::api::ModelClient;
use crate::config::QuillConfig;
use crate::error::QuillError;
use crate::tools::{self, ToolContext};
use crate::types::*;
use tracing::{debug, warn};

/// Events surfaced while a request runs. The REPL renders them; tests
/// collect them. The engine itself performs no I/O.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Model-authored text, in arrival order.
    Text(String),
    /// A tool invocation is about to run.
    ToolCall { name: String, summary: String },
    /// A tool invocation finished.
    ToolDone { name: String, ok: bool, preview: String },
}

/// A conversation session: owns the message history and the tool
/// context. History persists across requests until [`Session::clear`].
pub struct Session<C: ModelClient> {
    client: C,
    config: QuillConfig,
    tools: Vec<ToolDefinition>,
    tool_ctx: ToolContext,
    history: Vec<Message>,
    usage: TokenUsage,
}

impl<C: ModelClient> Session<C> {
    pub fn new(client: C, config: QuillConfig) -> Self {
        let tool_ctx = ToolContext {
            bash_timeout_secs: config.bash_timeout_secs,
        };
        Self {
            client,
            tools: tools::tool_definitions(),
            tool_ctx,
            history: Vec::new(),
            usage: TokenUsage::default(),
            config,
        }
    }

    /// Accumulated token usage across the session.
    pub fn usage(&self) -> TokenUsage {
        self.usage
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Drop all conversation history (backs the `/clear` command).
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Run one user request to completion. On any error the history is
    /// restored to its pre-request state, so a failed request leaves no
    /// trace and the next one starts clean.
    pub async fn submit(
        &mut self,
        input: &str,
        on_event: &mut dyn FnMut(SessionEvent),
    ) -> Result<(), QuillError> {
        let baseline = self.history.len();
        self.history.push(Message::user_text(input));

        let system = super::system_prompt::build_system_prompt(&self.config);

        let mut calls: u32 = 0;
        loop {
            if calls >= self.config.max_turns {
                warn!("Turn budget of {} exhausted", self.config.max_turns);
                self.history.truncate(baseline);
                return Err(QuillError::TurnBudget(self.config.max_turns));
            }
            calls += 1;

            let response = match self
                .client
                .complete(&system, &self.history, &self.tools)
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    self.history.truncate(baseline);
                    return Err(e);
                }
            };
            self.usage.add(response.usage);

            // First pass: emit text immediately, collect tool requests in
            // arrival order.
            let mut requests: Vec<(String, String, serde_json::Value)> = Vec::new();
            for block in &response.content {
                match block {
                    ContentBlock::Text { text } => on_event(SessionEvent::Text(text.clone())),
                    ContentBlock::ToolUse { id, name, input } => {
                        requests.push((id.clone(), name.clone(), input.clone()));
                    }
                    // Responses never carry tool results; dropping a stray
                    // one beats echoing it back to the model.
                    ContentBlock::ToolResult { .. } => {}
                }
            }

            // An explicit end_turn stops the loop even if tool-use blocks
            // are present; those tools are not executed.
            if requests.is_empty() || response.stop_reason == StopReason::EndTurn {
                self.history.push(Message::assistant(response.content));
                debug!("Request complete after {} model call(s)", calls);
                return Ok(());
            }

            // Second pass: run each tool to completion, in order, pairing
            // every result with the id that requested it.
            let mut results = Vec::with_capacity(requests.len());
            for (id, name, input) in requests {
                on_event(SessionEvent::ToolCall {
                    name: name.clone(),
                    summary: tools::summarize_input(&name, &input),
                });
                let outcome = tools::execute_tool(&self.tool_ctx, &name, &input).await;
                on_event(SessionEvent::ToolDone {
                    name,
                    ok: !outcome.is_error,
                    preview: outcome.preview(),
                });
                results.push(ContentBlock::tool_result(id, outcome.content));
            }

            self.history.push(Message::assistant(response.content));
            self.history.push(Message::tool_results(results));
        }
    }
}
