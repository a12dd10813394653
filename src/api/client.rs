//! Messages API client with tool-use support.
//!
//! Speaks the hosted Messages wire format: request is
//! `{model, max_tokens, system, tools, messages}`, response is
//! `{content, stop_reason, usage}`. When a proxy is configured the same
//! body goes to the proxy URL with no auth header.

use crate::config::QuillConfig;
use crate::error::QuillError;
use crate::types::*;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// How credentials are attached to a direct (non-proxy) request.
#[derive(Debug, Clone)]
enum Auth {
    ApiKey(String),
    Bearer(String),
    /// Proxy deployments: the proxy holds the credentials.
    None,
}

/// HTTP client for the Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    endpoint: String,
    auth: Auth,
    model: String,
    max_tokens: u32,
    http: reqwest::Client,
}

// -- Request / response types -----------------------------------------------

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    tools: &'a [ToolDefinition],
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    stop_reason: Option<StopReason>,
    #[serde(default)]
    usage: TokenUsage,
}

impl AnthropicClient {
    /// Build a client from the startup configuration.
    pub fn new(config: &QuillConfig) -> Self {
        let auth = if config.uses_proxy() {
            Auth::None
        } else if config.auth_scheme == "bearer" {
            Auth::Bearer(config.api_key.clone())
        } else {
            Auth::ApiKey(config.api_key.clone())
        };

        Self {
            endpoint: config.effective_endpoint(),
            auth,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl crate::api::ModelClient for AnthropicClient {
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ModelResponse, QuillError> {
        if matches!(self.auth, Auth::ApiKey(ref k) | Auth::Bearer(ref k) if k.is_empty()) {
            return Err(QuillError::Configuration(
                "no API key configured; set ANTHROPIC_API_KEY or QUILL_PROXY".into(),
            ));
        }

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            tools,
            messages,
        };

        debug!("Model request: {} messages, {} tools", messages.len(), tools.len());

        let mut builder = self
            .http
            .post(&self.endpoint)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request);

        builder = match &self.auth {
            Auth::ApiKey(key) => builder.header("x-api-key", key),
            Auth::Bearer(token) => builder.bearer_auth(token),
            Auth::None => builder,
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| QuillError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(QuillError::Transport(format!(
                "API returned {}: {}",
                status,
                truncate(&body, 500)
            )));
        }

        let body: MessagesResponse = resp
            .json()
            .await
            .map_err(|e| QuillError::BadResponse(e.to_string()))?;

        debug!(
            "Model response: {} blocks, stop_reason={}, {} tokens",
            body.content.len(),
            body.stop_reason.map(|r| r.to_string()).unwrap_or_else(|| "none".into()),
            body.usage.total(),
        );

        Ok(ModelResponse {
            content: body.content,
            stop_reason: body.stop_reason.unwrap_or(StopReason::EndTurn),
            usage: body.usage,
        })
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
