//! Parameter validation
//!
//! Count parameters must be positive integers. Text parameters must be
//! non-empty after trimming. Every offender is reported, not just the first.

use scribe_core::{ParamKind, ParamValue, ParameterSet};
use scribe_templates::TemplateDefinition;
use std::collections::HashMap;

/// Validated, normalized values keyed by parameter name, ready for rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidatedParams(HashMap<String, String>);

impl ValidatedParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validate `params` against the template's required parameters.
///
/// On failure returns the offending names in registry order. Keys the template
/// does not name are ignored.
pub fn validate_params(
    template: &TemplateDefinition,
    params: &ParameterSet,
) -> Result<ValidatedParams, Vec<String>> {
    let mut values = HashMap::new();
    let mut invalid = Vec::new();

    for spec in template.params() {
        let raw = params.get(&spec.name);
        let normalized = match spec.kind {
            ParamKind::Count => positive_count(raw).map(|n| n.to_string()),
            ParamKind::Text => non_empty_text(raw),
        };
        match normalized {
            Some(value) => {
                values.insert(spec.name.clone(), value);
            }
            None => invalid.push(spec.name.clone()),
        }
    }

    if invalid.is_empty() {
        Ok(ValidatedParams(values))
    } else {
        Err(invalid)
    }
}

fn positive_count(raw: Option<&ParamValue>) -> Option<i64> {
    let n = match raw? {
        ParamValue::Integer(n) => *n,
        ParamValue::Text(s) => s.trim().parse::<i64>().ok()?,
    };
    (n > 0).then_some(n)
}

fn non_empty_text(raw: Option<&ParamValue>) -> Option<String> {
    let text = match raw? {
        ParamValue::Integer(n) => n.to_string(),
        ParamValue::Text(s) => s.trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_accepts_positive_integers_and_numeric_text() {
        assert_eq!(positive_count(Some(&ParamValue::Integer(1))), Some(1));
        assert_eq!(positive_count(Some(&ParamValue::Text(" 500 ".into()))), Some(500));
        assert_eq!(positive_count(Some(&ParamValue::Text("+7".into()))), Some(7));
    }

    #[test]
    fn count_rejects_zero_negative_and_garbage() {
        assert_eq!(positive_count(None), None);
        assert_eq!(positive_count(Some(&ParamValue::Integer(0))), None);
        assert_eq!(positive_count(Some(&ParamValue::Integer(-5))), None);
        assert_eq!(positive_count(Some(&ParamValue::Text("".into()))), None);
        assert_eq!(positive_count(Some(&ParamValue::Text("five".into()))), None);
        assert_eq!(positive_count(Some(&ParamValue::Text("2.5".into()))), None);
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(non_empty_text(Some(&ParamValue::Text("  hi  ".into()))), Some("hi".into()));
        assert_eq!(non_empty_text(Some(&ParamValue::Text(" \t\n".into()))), None);
        assert_eq!(non_empty_text(Some(&ParamValue::Integer(3))), Some("3".into()));
        assert_eq!(non_empty_text(None), None);
    }
}
