//! Placeholder parsing and substitution
//!
//! Patterns use `{name}` placeholders. `{{` and `}}` are literal braces.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("no value for placeholder '{0}'")]
    MissingValue(String),

    #[error("unclosed '{{' at byte {0}")]
    UnclosedBrace(usize),

    #[error("unmatched '}}' at byte {0}")]
    UnmatchedClosingBrace(usize),

    #[error("empty placeholder at byte {0}")]
    EmptyPlaceholder(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Brace(char),
    Placeholder(&'a str),
}

fn parse(pattern: &str) -> Result<Vec<Segment<'_>>, RenderError> {
    let mut segments = Vec::new();
    let mut chars = pattern.char_indices().peekable();
    let mut literal_start = 0;

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' | '}' if chars.peek().map(|&(_, n)| n) == Some(c) => {
                segments.push(Segment::Literal(&pattern[literal_start..pos]));
                segments.push(Segment::Brace(c));
                chars.next();
                literal_start = pos + 2;
            }
            '{' => {
                segments.push(Segment::Literal(&pattern[literal_start..pos]));
                let name_start = pos + 1;
                let close = loop {
                    match chars.next() {
                        Some((end, '}')) => break end,
                        Some((_, '{')) | None => return Err(RenderError::UnclosedBrace(pos)),
                        Some(_) => {}
                    }
                };
                let name = &pattern[name_start..close];
                if name.trim().is_empty() {
                    return Err(RenderError::EmptyPlaceholder(pos));
                }
                segments.push(Segment::Placeholder(name));
                literal_start = close + 1;
            }
            '}' => return Err(RenderError::UnmatchedClosingBrace(pos)),
            _ => {}
        }
    }
    segments.push(Segment::Literal(&pattern[literal_start..]));
    segments.retain(|s| !matches!(s, Segment::Literal("")));
    Ok(segments)
}

/// Placeholder names referenced by `pattern`, in order of first appearance.
pub fn placeholders(pattern: &str) -> Result<Vec<String>, RenderError> {
    let mut names: Vec<String> = Vec::new();
    for segment in parse(pattern)? {
        if let Segment::Placeholder(name) = segment {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

/// Substitute every placeholder in `pattern` from `values`.
///
/// Pure: identical inputs give identical output. Fails rather than dropping a
/// placeholder that has no value.
pub fn render(pattern: &str, values: &HashMap<String, String>) -> Result<String, RenderError> {
    let mut out = String::with_capacity(pattern.len());
    for segment in parse(pattern)? {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Brace(c) => out.push(c),
            Segment::Placeholder(name) => match values.get(name) {
                Some(value) => out.push_str(value),
                None => return Err(RenderError::MissingValue(name.to_string())),
            },
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_literals_and_placeholders() {
        let segs = parse("a{x}b").unwrap();
        assert_eq!(
            segs,
            vec![Segment::Literal("a"), Segment::Placeholder("x"), Segment::Literal("b")]
        );
    }

    #[test]
    fn parse_handles_multibyte_literals() {
        let segs = parse("请以{主题}为核心").unwrap();
        assert_eq!(segs[1], Segment::Placeholder("主题"));
        assert_eq!(segs[2], Segment::Literal("为核心"));
    }

    #[test]
    fn parse_escaped_braces() {
        let segs = parse("{{x}}").unwrap();
        assert_eq!(
            segs,
            vec![Segment::Brace('{'), Segment::Literal("x"), Segment::Brace('}')]
        );
    }

    #[test]
    fn parse_nested_open_brace_is_error() {
        assert_eq!(parse("{a{b}"), Err(RenderError::UnclosedBrace(0)));
    }
}
