//! Document model for the path engine.
//!
//! The engine walks any tree that implements the [`Document`] trait: scalar
//! leaves, objects with named fields, and ordered arrays. Two adapters are
//! provided: [`value::Value`] for schemaless data (open-ended maps with
//! dynamically typed values) and [`record::TypedValue`] for records with a
//! declared, closed field-type set.

pub mod record;
pub mod value;

use std::fmt;

/// Classification of a document node, as seen by the path engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf value: integer, float, boolean, string, or bytes.
    Scalar,
    /// A named-field container.
    Object,
    /// An ordered, 0-indexed container.
    Array,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Scalar => write!(f, "scalar"),
            NodeKind::Object => write!(f, "object"),
            NodeKind::Array => write!(f, "array"),
        }
    }
}

/// Errors raised by document adapters during writes and copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A node's type is outside the closed set the adapter can duplicate.
    UnsupportedType { field: String, found: String },
    /// A value does not match the type declared for a record field.
    SchemaMismatch { field: String, expected: String },
    /// A record's schema does not declare the named field.
    UnknownField { field: String },
    /// A field write was attempted on a non-object node.
    NotAnObject { found: NodeKind },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::UnsupportedType { field, found } => {
                write!(f, "{} is not supported for field '{}'", found, field)
            }
            DocumentError::SchemaMismatch { field, expected } => {
                write!(f, "field '{}' expects a value of type {}", field, expected)
            }
            DocumentError::UnknownField { field } => {
                write!(f, "schema does not declare field '{}'", field)
            }
            DocumentError::NotAnObject { found } => {
                write!(f, "cannot write a field into a {} node", found)
            }
        }
    }
}

impl std::error::Error for DocumentError {}

/// The capability set the path engine requires from a document tree.
///
/// Mutating operations (`put_field`, element assignment through
/// `elements_mut`) are only ever applied to copies the engine itself created
/// with `deep_copy`; caller-owned documents are never written to.
pub trait Document: Sized {
    /// Classifies this node.
    fn kind(&self) -> NodeKind;

    /// Reads a named field of an object node. `None` means the field is
    /// absent, which is a silent outcome for the engine, never an error.
    fn get_field(&self, name: &str) -> Option<&Self>;

    /// Mutable variant of [`get_field`](Document::get_field).
    fn get_field_mut(&mut self, name: &str) -> Option<&mut Self>;

    /// Whether this object can hold the named field at all. Schemaless
    /// objects are open-world and accept any name; typed records answer
    /// from the declared schema.
    fn has_field(&self, name: &str) -> bool;

    /// Writes a named field and returns the written slot, so traversal can
    /// continue through a replacement value.
    fn put_field(&mut self, name: &str, value: Self) -> Result<&mut Self, DocumentError>;

    /// The elements of an array node, or `None` for any other kind.
    fn elements(&self) -> Option<&[Self]>;

    /// Mutable variant of [`elements`](Document::elements). Element
    /// replacement is assignment through this slice.
    fn elements_mut(&mut self) -> Option<&mut [Self]>;

    /// Recursively duplicates this node. Byte sequences are duplicated,
    /// never aliased.
    fn deep_copy(&self) -> Result<Self, DocumentError>;

    /// String view of a string-kind scalar, used by the template formatter.
    fn as_text(&self) -> Option<&str>;
}
