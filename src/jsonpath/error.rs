//! Error types for path parsing and evaluation.

use std::fmt;

use crate::document::{DocumentError, NodeKind};

/// What went wrong while parsing a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected character at a specific position.
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    InvalidSyntax { message: String },
}

/// A malformed path expression. Raised at compile time, never during
/// traversal; always carries the offending expression text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub expression: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(expression: &str, kind: ParseErrorKind) -> Self {
        Self {
            expression: expression.to_string(),
            kind,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid path expression '{}': ", self.expression)?;
        match &self.kind {
            ParseErrorKind::UnexpectedToken {
                position,
                found,
                expected,
            } => write!(
                f,
                "unexpected token '{}' at position {}, expected {}",
                found, position, expected
            ),
            ParseErrorKind::UnexpectedEnd { expected } => {
                write!(f, "unexpected end of input, expected {}", expected)
            }
            ParseErrorKind::InvalidSyntax { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ParseError {}

/// A traversal failure. Terminal for the call that raised it; missing
/// fields and out-of-range indices are not errors and never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A step expected one node kind but found another at the given
    /// canonical path.
    TypeMismatch {
        path: String,
        expected: NodeKind,
        found: NodeKind,
    },
    /// An adapter rejected a write or copy at the given canonical path.
    Document { path: String, source: DocumentError },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::TypeMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "field '{}' is not an {} ({} found)",
                path, expected, found
            ),
            EvalError::Document { path, source } => {
                write!(f, "error while processing field '{}': {}", path, source)
            }
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Document { source, .. } => Some(source),
            _ => None,
        }
    }
}
