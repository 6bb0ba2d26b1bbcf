//! Compiled representation of path expressions.

/// A single step in a compiled path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Named field of an object (`.name` or `['name']`)
    Field(String),
    /// One array element by index (`[3]`)
    Index(usize),
    /// Every element of an array (`[*]`)
    Wildcard,
}

/// A compiled path expression: the ordered steps after the `$` root marker.
///
/// Compiled expressions hold no document references and are immutable, so a
/// single instance can be reused across unboundedly many documents and
/// shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    /// Steps in evaluation order.
    pub steps: Vec<PathStep>,
}

impl JsonPath {
    /// Creates a path from the given steps.
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }
}
