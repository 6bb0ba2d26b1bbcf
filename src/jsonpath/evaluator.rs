//! Path evaluation: read extraction and copy-on-write updates.
//!
//! Both entry points fold the compiled step sequence over a path map that
//! starts as `{"$": root}`. Each step rebuilds the map: object steps follow
//! a named field, array steps select one or every element, and fan-out
//! (wildcards, or matches accumulating across steps) is how one expression
//! reaches many leaves. Missing fields and out-of-range indices silently
//! drop their entry; a step applied to the wrong node kind aborts the call.

use std::collections::HashMap;

use super::ast::{JsonPath, PathStep};
use super::error::{EvalError, ParseError};
use super::parser::Parser;
use crate::document::{Document, NodeKind};

/// Canonical path of the document root.
pub const ROOT_PATH: &str = "$";

/// Result of a read traversal: canonical path to the node reached there.
/// The entry set is deterministic for a given document and expression;
/// iteration order is not.
pub type PathMap<'a, D> = HashMap<String, &'a D>;

fn field_path(base: &str, name: &str) -> String {
    format!("{}.{}", base, name)
}

fn index_path(base: &str, index: usize) -> String {
    format!("{}[{}]", base, index)
}

/// A reusable read query compiled from a path expression.
#[derive(Debug)]
pub struct Getter {
    path: JsonPath,
}

impl Getter {
    /// Compiles the expression. No document is touched here; parse
    /// failures can only happen at this point.
    pub fn new(expression: &str) -> Result<Self, ParseError> {
        Ok(Self {
            path: Parser::parse(expression)?,
        })
    }

    /// The compiled expression.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Extracts every value the expression reaches in `document`, keyed by
    /// canonical path. Pure: the document is only read.
    pub fn run<'a, D: Document>(&self, document: &'a D) -> Result<PathMap<'a, D>, EvalError> {
        let mut map = PathMap::new();
        map.insert(ROOT_PATH.to_string(), document);
        for step in &self.path.steps {
            map = apply_get_step(map, step)?;
        }
        Ok(map)
    }
}

/// A reusable update compiled from a path expression.
pub struct Updater {
    path: JsonPath,
}

impl Updater {
    /// Compiles the expression, like [`Getter::new`].
    pub fn new(expression: &str) -> Result<Self, ParseError> {
        Ok(Self {
            path: Parser::parse(expression)?,
        })
    }

    /// The compiled expression.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Returns a copy of `original` with the values in `replacements`
    /// (keyed by canonical path) applied at every matching slot the
    /// expression reaches. `original` is never mutated. Replacement keys
    /// that no traversal entry resolves to are ignored; slots without a
    /// replacement propagate unchanged (read-through).
    pub fn run<D: Document>(
        &self,
        original: &D,
        replacements: &HashMap<String, D>,
    ) -> Result<D, EvalError> {
        let mut updated = original.deep_copy().map_err(|source| EvalError::Document {
            path: ROOT_PATH.to_string(),
            source,
        })?;
        if replacements.is_empty() {
            return Ok(updated);
        }

        let mut map: HashMap<String, &mut D> = HashMap::new();
        map.insert(ROOT_PATH.to_string(), &mut updated);
        for step in &self.path.steps {
            map = apply_update_step(map, step, replacements)?;
        }
        drop(map);

        Ok(updated)
    }
}

fn apply_get_step<'a, D: Document>(
    map: PathMap<'a, D>,
    step: &PathStep,
) -> Result<PathMap<'a, D>, EvalError> {
    let mut next = PathMap::new();
    for (path, node) in map {
        match step {
            PathStep::Field(name) => {
                if node.kind() != NodeKind::Object {
                    return Err(EvalError::TypeMismatch {
                        path,
                        expected: NodeKind::Object,
                        found: node.kind(),
                    });
                }
                if let Some(child) = node.get_field(name) {
                    next.insert(field_path(&path, name), child);
                }
            }
            PathStep::Index(index) => {
                let elements = require_array(node, &path)?;
                if let Some(child) = elements.get(*index) {
                    next.insert(index_path(&path, *index), child);
                }
            }
            PathStep::Wildcard => {
                let elements = require_array(node, &path)?;
                for (index, child) in elements.iter().enumerate() {
                    next.insert(index_path(&path, index), child);
                }
            }
        }
    }
    Ok(next)
}

fn require_array<'a, D: Document>(node: &'a D, path: &str) -> Result<&'a [D], EvalError> {
    node.elements().ok_or_else(|| EvalError::TypeMismatch {
        path: path.to_string(),
        expected: NodeKind::Array,
        found: node.kind(),
    })
}

fn apply_update_step<'a, D: Document>(
    map: HashMap<String, &'a mut D>,
    step: &PathStep,
    replacements: &HashMap<String, D>,
) -> Result<HashMap<String, &'a mut D>, EvalError> {
    let mut next = HashMap::new();
    for (path, node) in map {
        match step {
            PathStep::Field(name) => {
                if node.kind() != NodeKind::Object {
                    return Err(EvalError::TypeMismatch {
                        path,
                        expected: NodeKind::Object,
                        found: node.kind(),
                    });
                }
                if !node.has_field(name) {
                    // closed-schema objects skip unaddressable fields
                    continue;
                }
                let child_path = field_path(&path, name);
                if let Some(replacement) = replacements.get(&child_path) {
                    let copied = copy_replacement(replacement, &child_path)?;
                    let slot =
                        node.put_field(name, copied)
                            .map_err(|source| EvalError::Document {
                                path: child_path.clone(),
                                source,
                            })?;
                    next.insert(child_path, slot);
                } else if let Some(child) = node.get_field_mut(name) {
                    next.insert(child_path, child);
                }
            }
            PathStep::Index(index) => {
                let found = node.kind();
                let Some(elements) = node.elements_mut() else {
                    return Err(EvalError::TypeMismatch {
                        path,
                        expected: NodeKind::Array,
                        found,
                    });
                };
                if let Some(element) = elements.get_mut(*index) {
                    let child_path = index_path(&path, *index);
                    if let Some(replacement) = replacements.get(&child_path) {
                        *element = copy_replacement(replacement, &child_path)?;
                    }
                    next.insert(child_path, element);
                }
            }
            PathStep::Wildcard => {
                let found = node.kind();
                let Some(elements) = node.elements_mut() else {
                    return Err(EvalError::TypeMismatch {
                        path,
                        expected: NodeKind::Array,
                        found,
                    });
                };
                for (index, element) in elements.iter_mut().enumerate() {
                    let child_path = index_path(&path, index);
                    if let Some(replacement) = replacements.get(&child_path) {
                        *element = copy_replacement(replacement, &child_path)?;
                    }
                    next.insert(child_path, element);
                }
            }
        }
    }
    Ok(next)
}

/// Replacement values enter the copy as duplicates, never aliases, so a
/// caller's replacement map stays untouched and reusable.
fn copy_replacement<D: Document>(replacement: &D, path: &str) -> Result<D, EvalError> {
    replacement.deep_copy().map_err(|source| EvalError::Document {
        path: path.to_string(),
        source,
    })
}
