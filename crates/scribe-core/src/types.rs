//! Core types for Scribe

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Literal prefix every API key must carry before a remote call is attempted.
pub const CREDENTIAL_PREFIX: &str = "sk-";

/// Prefix on every user-facing failure message.
pub const FAILURE_MARKER: &str = "❌";

/// API key that has passed the format precondition.
///
/// Construct with [`Credential::parse`]. The key is trimmed; `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for empty, whitespace-only, or unprefixed keys.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.starts_with(CREDENTIAL_PREFIX) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({}***)", CREDENTIAL_PREFIX)
    }
}

/// Raw parameter value as supplied by a front-end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Text(String),
}

impl ParamValue {
    /// Interpret command-line or form input: integer-looking text becomes `Integer`.
    pub fn from_input(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => Self::Integer(n),
            Err(_) => Self::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self { Self::Text(s) }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self { Self::Text(s.to_string()) }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self { Self::Integer(n) }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self { Self::Integer(n.into()) }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self { Self::Integer(n.into()) }
}

/// Validation policy for a template parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Non-empty after trimming.
    #[default]
    Text,
    /// Positive integer (word counts, chapter counts).
    Count,
}

/// Parameter name → raw value, built fresh for each generation request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(HashMap<String, ParamValue>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Closed set of failure categories reported to front-ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidCredential,
    ClientInitFailure,
    UnknownTemplate,
    /// Offending parameter names, in registry order.
    InvalidParameters(Vec<String>),
    TemplateRenderError,
    RemoteError,
    QuotaExceeded,
    RateLimited,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCredential => "invalid_credential",
            Self::ClientInitFailure => "client_init_failure",
            Self::UnknownTemplate => "unknown_template",
            Self::InvalidParameters(_) => "invalid_parameters",
            Self::TemplateRenderError => "template_render_error",
            Self::RemoteError => "remote_error",
            Self::QuotaExceeded => "quota_exceeded",
            Self::RateLimited => "rate_limited",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified failure. `message` always starts with [`FAILURE_MARKER`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl Failure {
    /// Prefixes `text` with the failure marker unless it already carries it.
    pub fn new(kind: ErrorKind, text: impl Into<String>) -> Self {
        let text = text.into();
        let message = if text.starts_with(FAILURE_MARKER) {
            text
        } else {
            format!("{} {}", FAILURE_MARKER, text)
        };
        Self { kind, message }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of one generation call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationResult {
    Success { text: String },
    Failure(Failure),
}

impl GenerationResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text } => Some(text),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(f) => Some(f),
        }
    }

    pub fn kind(&self) -> Option<&ErrorKind> {
        self.failure().map(|f| &f.kind)
    }

    /// Text a front-end should display: the generated text or the failure message.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Success { text } => text,
            Self::Failure(f) => &f.message,
        }
    }
}

impl From<Failure> for GenerationResult {
    fn from(f: Failure) -> Self { Self::Failure(f) }
}

impl From<Result<String, Failure>> for GenerationResult {
    fn from(r: Result<String, Failure>) -> Self {
        match r {
            Ok(text) => Self::Success { text },
            Err(f) => Self::Failure(f),
        }
    }
}
