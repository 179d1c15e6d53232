//! Remote failure classification
//!
//! Structured errors from the provider are dispatched on their variant.
//! Anything else falls back to case-insensitive substring matching on the
//! error text.

use crate::messages;
use scribe_core::Failure;
use scribe_llm::LlmError;

pub fn classify_error(err: &LlmError) -> Failure {
    match err {
        LlmError::AuthFailed(_) => messages::credential_rejected(),
        LlmError::QuotaExceeded(_) => messages::quota_exceeded(),
        LlmError::RateLimited(_) => messages::rate_limited(),
        LlmError::ClientInit(detail) => messages::client_init_failure(detail),
        // Remote text verbatim, without the status prefix.
        LlmError::Api { message, .. } => classify_message(message),
        LlmError::InvalidResponse(_) | LlmError::NetworkError(_) => {
            classify_message(&err.to_string())
        }
    }
}

/// Classify unstructured error text.
pub fn classify_message(text: &str) -> Failure {
    let lowered = text.to_lowercase();
    if lowered.contains("invalid api key") {
        messages::credential_rejected()
    } else if lowered.contains("insufficient funds") || lowered.contains("insufficient balance") {
        messages::quota_exceeded()
    } else if lowered.contains("rate limit") {
        messages::rate_limited()
    } else {
        messages::remote_error(text)
    }
}
