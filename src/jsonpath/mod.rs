//! Path expression compiler and evaluation engine.
//!
//! A small JSONPath dialect for addressing values inside tree-shaped
//! documents, with a read side (extract every matching value, keyed by
//! canonical path) and a write side (produce an updated copy, never
//! touching the original).
//!
//! # Supported Syntax
//!
//! - `$` - document root
//! - `.field` - named field access
//! - `['field']` - bracket notation, identical to the dot form
//! - `[0]` - array index (non-negative)
//! - `[*]` - every element of an array
//!
//! Filters, recursive descent (`..`), and slices are deliberately not part
//! of the dialect.
//!
//! # Examples
//!
//! ```
//! // $.struct.arr[*]        - all elements of a nested array
//! // $['struct']['arr'][0]  - bracket form of $.struct.arr[0]
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{JsonPath, PathStep};
pub use error::{EvalError, ParseError, ParseErrorKind};
pub use evaluator::{Getter, PathMap, Updater, ROOT_PATH};
pub use parser::Parser;
