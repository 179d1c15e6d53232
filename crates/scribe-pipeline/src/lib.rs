//! Scribe Pipeline - credential check, template resolution, parameter
//! validation, prompt rendering, remote call and failure classification

pub mod classify;
pub mod messages;
pub mod pipeline;
pub mod validate;

pub use classify::{classify_error, classify_message};
pub use pipeline::{GenerationSettings, Pipeline};
pub use validate::{validate_params, ValidatedParams};
