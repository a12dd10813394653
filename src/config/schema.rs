//! Configuration schema for config.toml (TOML-based).

use serde::{Deserialize, Serialize};

/// Root configuration structure. Built once at startup and passed by
/// reference into the client and session constructors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuillConfig {
    /// Messages API base URL.
    pub api_url: String,

    /// Optional proxy URL. When set, requests go to the proxy verbatim
    /// and no auth header is attached (the proxy holds the credentials).
    pub proxy_url: String,

    /// API key (or saved bearer token, see `auth_scheme`).
    pub api_key: String,

    /// Credential scheme: "api-key" sends x-api-key, "bearer" sends an
    /// Authorization header.
    pub auth_scheme: String,

    /// Model identifier for the conversation loop.
    pub model: String,

    /// Maximum tokens the model may generate per call.
    pub max_tokens: u32,

    /// Maximum model calls per user request before aborting.
    pub max_turns: u32,

    /// Default timeout for Bash tool invocations, in seconds.
    pub bash_timeout_secs: u64,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com".into(),
            proxy_url: String::new(),
            api_key: String::new(),
            auth_scheme: "api-key".into(),
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 4096,
            max_turns: 50,
            bash_timeout_secs: 120,
            log_level: "warn".into(),
        }
    }
}

impl QuillConfig {
    /// Whether a request could be attempted at all.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() || !self.proxy_url.is_empty()
    }

    /// Whether requests are routed through a proxy.
    pub fn uses_proxy(&self) -> bool {
        !self.proxy_url.is_empty()
    }

    /// The endpoint requests are sent to: the proxy when configured,
    /// otherwise the Messages API.
    pub fn effective_endpoint(&self) -> String {
        if self.uses_proxy() {
            self.proxy_url.clone()
        } else {
            format!("{}/v1/messages", self.api_url.trim_end_matches('/'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_prefers_proxy() {
        let mut config = QuillConfig::default();
        assert_eq!(
            config.effective_endpoint(),
            "https://api.anthropic.com/v1/messages"
        );

        config.proxy_url = "http://10.0.0.2:8080/claude".into();
        assert_eq!(config.effective_endpoint(), "http://10.0.0.2:8080/claude");
    }

    #[test]
    fn credentials_require_key_or_proxy() {
        let mut config = QuillConfig::default();
        assert!(!config.has_credentials());

        config.api_key = "sk-ant-test".into();
        assert!(config.has_credentials());

        config.api_key.clear();
        config.proxy_url = "http://localhost:8080".into();
        assert!(config.has_credentials());
    }
}
