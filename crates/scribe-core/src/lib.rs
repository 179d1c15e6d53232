//! Scribe Core - Shared types, outcomes, configuration and error handling

pub mod config;
pub mod error;
pub mod types;

pub use config::ScribeConfig;
pub use error::{Error, Result};
pub use types::*;
