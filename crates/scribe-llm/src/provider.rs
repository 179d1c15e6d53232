//! Completion provider traits

use crate::types::{ChatRequest, ChatResponse};
use std::sync::Arc;

/// Result type for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

/// LLM error types
///
/// `AuthFailed`, `QuotaExceeded` and `RateLimited` are only produced when the
/// endpoint said so (status code or error type). Everything else is unstructured.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("client init failed: {0}")]
    ClientInit(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("api error {status}: {message}")]
    Api {
        status: u16,
        error_type: Option<String>,
        message: String,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// A client bound to one credential and endpoint.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// One non-streaming round trip. No retry.
    async fn complete(&self, request: ChatRequest) -> LlmResult<ChatResponse>;
}

/// Builds a provider for a credential. Construction errors surface as `LlmError::ClientInit`.
pub trait ProviderConnector: Send + Sync {
    fn connect(&self, api_key: &str) -> LlmResult<Arc<dyn CompletionProvider>>;
}
