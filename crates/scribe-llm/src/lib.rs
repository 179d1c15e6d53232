//! Scribe LLM - Chat completion clients for OpenAI-compatible endpoints

pub mod moonshot;
pub mod provider;
pub mod types;

pub use moonshot::{MoonshotConnector, MoonshotProvider};
pub use provider::{CompletionProvider, LlmError, LlmResult, ProviderConnector};
pub use types::*;
