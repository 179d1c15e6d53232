//! Template registry and definitions
//!
//! Each template is a prompt pattern plus the ordered parameters it requires.
//! Templates are registered once at startup and only read afterwards. Built-in
//! sets live in builtin.rs; extra ones come from configuration.

use crate::render::{self, RenderError};
use scribe_core::config::{CustomParam, CustomTemplate};
use scribe_core::{Error, ParamKind, Result};
use std::collections::HashMap;

/// One parameter a template requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    /// Localized display name, used in user-facing messages.
    pub label: String,
    pub kind: ParamKind,
    /// Range the input widgets offer. Advisory only; validation accepts any positive count.
    pub suggested_range: Option<(i64, i64)>,
}

impl ParamSpec {
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: ParamKind::Text,
            suggested_range: None,
        }
    }

    pub fn count(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: ParamKind::Count,
            ..Self::text(name, label)
        }
    }

    pub fn with_suggested_range(mut self, min: i64, max: i64) -> Self {
        self.suggested_range = Some((min, max));
        self
    }

    pub fn is_count(&self) -> bool {
        self.kind == ParamKind::Count
    }
}

impl From<&CustomParam> for ParamSpec {
    fn from(p: &CustomParam) -> Self {
        let suggested_range = match (p.min, p.max) {
            (Some(min), Some(max)) => Some((min, max)),
            (Some(min), None) => Some((min, i64::MAX)),
            (None, Some(max)) => Some((1, max)),
            (None, None) => None,
        };
        Self {
            name: p.name.clone(),
            label: p.label.clone().unwrap_or_else(|| p.name.clone()),
            kind: p.kind,
            suggested_range,
        }
    }
}

/// Immutable template: id, display title, pattern, required parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateDefinition {
    id: String,
    title: String,
    pattern: String,
    params: Vec<ParamSpec>,
}

impl TemplateDefinition {
    /// Validate and build a definition. Parameter names must be unique and non-empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        pattern: impl Into<String>,
        params: Vec<ParamSpec>,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::invalid_template(id, "empty template id"));
        }
        for (i, p) in params.iter().enumerate() {
            if p.name.trim().is_empty() {
                return Err(Error::invalid_template(id, format!("parameter {} has no name", i)));
            }
            if params[..i].iter().any(|earlier| earlier.name == p.name) {
                return Err(Error::invalid_template(
                    id,
                    format!("duplicate parameter '{}'", p.name),
                ));
            }
        }
        Ok(Self::from_parts(id, title, pattern, params))
    }

    pub(crate) fn from_parts(
        id: impl Into<String>,
        title: impl Into<String>,
        pattern: impl Into<String>,
        params: Vec<ParamSpec>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            pattern: pattern.into(),
            params,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Required parameter names in registry order.
    pub fn required_params(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    /// Placeholder names used by the pattern.
    pub fn placeholders(&self) -> std::result::Result<Vec<String>, RenderError> {
        render::placeholders(&self.pattern)
    }

    /// Display labels for the given parameter names, falling back to the name.
    pub fn labels_for<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(|n| {
                let n = n.as_ref();
                self.param(n).map(|p| p.label.clone()).unwrap_or_else(|| n.to_string())
            })
            .collect()
    }
}

impl TryFrom<&CustomTemplate> for TemplateDefinition {
    type Error = Error;

    fn try_from(t: &CustomTemplate) -> Result<Self> {
        if t.pattern.is_empty() {
            return Err(Error::invalid_template(&t.id, "empty pattern"));
        }
        if let Err(e) = render::placeholders(&t.pattern) {
            return Err(Error::invalid_template(&t.id, e.to_string()));
        }
        Self::new(
            t.id.clone(),
            t.title.clone().unwrap_or_else(|| t.id.clone()),
            t.pattern.clone(),
            t.params.iter().map(ParamSpec::from).collect(),
        )
    }
}

/// Ordered template lookup by exact id.
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    templates: Vec<TemplateDefinition>,
    index: HashMap<String, usize>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. Replaces any existing template with the same id, keeping its slot.
    pub fn register(&mut self, template: TemplateDefinition) {
        match self.index.get(template.id()) {
            Some(&slot) => self.templates[slot] = template,
            None => {
                self.index.insert(template.id().to_string(), self.templates.len());
                self.templates.push(template);
            }
        }
    }

    /// Exact-match lookup. No prefix or case-insensitive matching.
    pub fn resolve(&self, id: &str) -> Option<&TemplateDefinition> {
        self.index.get(id).map(|&slot| &self.templates[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Templates in registration order.
    pub fn list(&self) -> &[TemplateDefinition] {
        &self.templates
    }

    pub fn ids(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
