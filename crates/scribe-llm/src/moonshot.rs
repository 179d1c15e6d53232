//! Moonshot (Kimi) provider over the OpenAI-compatible chat completions API

use crate::provider::{CompletionProvider, LlmError, LlmResult, ProviderConnector};
use crate::types::{ChatRequest, ChatResponse, ErrorEnvelope};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use scribe_core::config::{ApiConfig, DEFAULT_BASE_URL};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

pub struct MoonshotProvider {
    client: Client,
    endpoint: String,
}

impl MoonshotProvider {
    /// Build a client bound to `api_key`. Fails if the key cannot be sent as a
    /// header or the HTTP client cannot be constructed.
    pub fn new(api_key: &str, base_url: &str, timeout: Option<Duration>) -> LlmResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| LlmError::ClientInit(format!("invalid api key header: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: chat_endpoint(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// `{base_url}/chat/completions`, tolerating a trailing slash.
pub fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[async_trait::async_trait]
impl CompletionProvider for MoonshotProvider {
    fn name(&self) -> &str { "moonshot" }

    async fn complete(&self, request: ChatRequest) -> LlmResult<ChatResponse> {
        debug!(
            "Moonshot request: model={} messages={} max_tokens={}",
            request.model,
            request.messages.len(),
            request.max_tokens
        );

        let response = self.client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Moonshot error {}: {}", status, body);
            return Err(error_from_status(status, &body));
        }

        serde_json::from_str::<ChatResponse>(&body)
            .map_err(|e| LlmError::InvalidResponse(format!("{}: {}", e, truncate(&body, 200))))
    }
}

/// Map an error response to a structured error.
///
/// The body's `error.type` wins; the status code decides otherwise.
pub fn error_from_status(status: StatusCode, body: &str) -> LlmError {
    let (message, error_type) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.error_type),
        Err(_) => (body.trim().to_string(), None),
    };
    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        message
    };

    match error_type.as_deref() {
        Some("invalid_authentication_error" | "invalid_api_key" | "authentication_error") => {
            return LlmError::AuthFailed(message)
        }
        Some("exceeded_current_quota_error" | "insufficient_quota" | "insufficient_balance") => {
            return LlmError::QuotaExceeded(message)
        }
        Some("rate_limit_reached_error" | "rate_limit_exceeded" | "rate_limit_error") => {
            return LlmError::RateLimited(message)
        }
        _ => {}
    }

    let lowered = message.to_lowercase();
    match status.as_u16() {
        401 => LlmError::AuthFailed(message),
        402 => LlmError::QuotaExceeded(message),
        429 if lowered.contains("quota") || lowered.contains("insufficient") => {
            LlmError::QuotaExceeded(message)
        }
        429 => LlmError::RateLimited(message),
        code => LlmError::Api { status: code, error_type, message },
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

/// Connects Moonshot providers against a fixed base address.
#[derive(Clone, Debug)]
pub struct MoonshotConnector {
    base_url: String,
    timeout: Option<Duration>,
}

impl MoonshotConnector {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(api.base_url.clone()).with_timeout(api.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for MoonshotConnector {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ProviderConnector for MoonshotConnector {
    fn connect(&self, api_key: &str) -> LlmResult<Arc<dyn CompletionProvider>> {
        let provider = MoonshotProvider::new(api_key, &self.base_url, self.timeout)?;
        Ok(Arc::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url() {
        assert_eq!(chat_endpoint("https://api.moonshot.cn/v1"), "https://api.moonshot.cn/v1/chat/completions");
        assert_eq!(chat_endpoint("http://localhost:1/v1/"), "http://localhost:1/v1/chat/completions");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("你好世界", 2), "你好…");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn header_rejects_control_characters() {
        let err = MoonshotProvider::new("sk-bad\nkey", DEFAULT_BASE_URL, None).err().unwrap();
        assert!(matches!(err, LlmError::ClientInit(_)));
    }
}
