//! String templates with embedded path expressions.
//!
//! A format string mixes literal text with `{ <path> }` placeholders, each
//! holding a path expression compiled once at template construction.
//! Rendering runs every placeholder's [`Getter`] against a document and
//! splices the extracted strings between the literals:
//!
//! ```
//! use jsonpick::{Template, Value};
//! use serde_json::json;
//!
//! let doc = Value::try_from(json!({"user": {"name": "ada"}})).unwrap();
//! let template = Template::compile("hello, { $.user.name }!").unwrap();
//! assert_eq!(template.render(&doc).unwrap(), "hello, ada!");
//! ```

use std::fmt;

use crate::document::Document;
use crate::jsonpath::{EvalError, Getter, ParseError};

/// Errors raised while compiling or rendering a template.
#[derive(Debug)]
pub enum TemplateError {
    /// A placeholder held a malformed path expression.
    InvalidPath {
        expression: String,
        source: ParseError,
    },
    /// A placeholder's expression matched nothing in the document.
    NoMatch { expression: String },
    /// A placeholder's expression matched a non-string value.
    NotText { expression: String },
    /// A placeholder's traversal failed.
    Eval {
        expression: String,
        source: EvalError,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::InvalidPath { expression, source } => {
                write!(f, "invalid placeholder path '{}': {}", expression, source)
            }
            TemplateError::NoMatch { expression } => {
                write!(f, "no field in the document matched path '{}'", expression)
            }
            TemplateError::NotText { expression } => write!(
                f,
                "the value matching path '{}' is not a string",
                expression
            ),
            TemplateError::Eval { expression, source } => {
                write!(f, "failed to evaluate path '{}': {}", expression, source)
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::InvalidPath { source, .. } => Some(source),
            TemplateError::Eval { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum Segment {
    Literal(String),
    Path { expression: String, getter: Getter },
}

/// A compiled format string. Immutable after construction and safe to
/// share across threads, like the getters it holds.
#[derive(Debug)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Splits the format string on `{ ... }` placeholders and compiles
    /// each one. Whitespace around a placeholder's path is trimmed; a `{`
    /// without a closing `}` is literal text.
    pub fn compile(format: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut remaining = format;

        while let Some(open) = remaining.find('{') {
            let Some(close) = remaining[open + 1..].find('}') else {
                break;
            };
            if open > 0 {
                segments.push(Segment::Literal(remaining[..open].to_string()));
            }
            let expression = remaining[open + 1..open + 1 + close].trim().to_string();
            let getter =
                Getter::new(&expression).map_err(|source| TemplateError::InvalidPath {
                    expression: expression.clone(),
                    source,
                })?;
            segments.push(Segment::Path { expression, getter });
            remaining = &remaining[open + 1 + close + 1..];
        }
        if !remaining.is_empty() {
            segments.push(Segment::Literal(remaining.to_string()));
        }

        Ok(Self { segments })
    }

    /// Renders the template against a document. When a placeholder matches
    /// more than one leaf, the one with the lexicographically smallest
    /// canonical path wins, so rendering is deterministic.
    pub fn render<D: Document>(&self, document: &D) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Path { expression, getter } => {
                    let matches =
                        getter
                            .run(document)
                            .map_err(|source| TemplateError::Eval {
                                expression: expression.clone(),
                                source,
                            })?;
                    let Some((_, value)) = matches.iter().min_by(|a, b| a.0.cmp(b.0)) else {
                        return Err(TemplateError::NoMatch {
                            expression: expression.clone(),
                        });
                    };
                    let Some(text) = value.as_text() else {
                        return Err(TemplateError::NotText {
                            expression: expression.clone(),
                        });
                    };
                    out.push_str(text);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::value::Value;
    use serde_json::json;

    #[test]
    fn test_compile_splits_literals_and_placeholders() {
        let template = Template::compile("a-{ $.x }-b").unwrap();
        assert_eq!(template.segments.len(), 3);
        assert!(matches!(&template.segments[0], Segment::Literal(s) if s == "a-"));
        assert!(
            matches!(&template.segments[1], Segment::Path { expression, .. } if expression == "$.x")
        );
        assert!(matches!(&template.segments[2], Segment::Literal(s) if s == "-b"));
    }

    #[test]
    fn test_compile_unterminated_brace_is_literal() {
        let template = Template::compile("prefix {$.x").unwrap();
        assert_eq!(template.segments.len(), 1);
        assert!(matches!(&template.segments[0], Segment::Literal(s) if s == "prefix {$.x"));
    }

    #[test]
    fn test_compile_invalid_placeholder_fails() {
        let err = Template::compile("x-{not a path}-y").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidPath { .. }));
    }

    #[test]
    fn test_render_literal_only() {
        let doc = Value::try_from(json!({"a": "b"})).unwrap();
        let template = Template::compile("no placeholders").unwrap();
        assert_eq!(template.render(&doc).unwrap(), "no placeholders");
    }

    #[test]
    fn test_render_trailing_placeholder() {
        let doc = Value::try_from(json!({"a": "end"})).unwrap();
        let template = Template::compile("value: {$.a}").unwrap();
        assert_eq!(template.render(&doc).unwrap(), "value: end");
    }

    #[test]
    fn test_render_no_match_fails() {
        let doc = Value::try_from(json!({"a": "b"})).unwrap();
        let template = Template::compile("{ $.missing }").unwrap();
        assert!(matches!(
            template.render(&doc).unwrap_err(),
            TemplateError::NoMatch { .. }
        ));
    }

    #[test]
    fn test_render_non_string_fails() {
        let doc = Value::try_from(json!({"n": 5})).unwrap();
        let template = Template::compile("{ $.n }").unwrap();
        assert!(matches!(
            template.render(&doc).unwrap_err(),
            TemplateError::NotText { .. }
        ));
    }

    #[test]
    fn test_render_multi_match_picks_smallest_path() {
        let doc = Value::try_from(json!({"arr": ["first", "second", "third"]})).unwrap();
        let template = Template::compile("{ $.arr[*] }").unwrap();
        assert_eq!(template.render(&doc).unwrap(), "first");
    }
}
