//! jsonpick - JSONPath-style extraction and copy-on-write updates for
//! nested documents.
//!
//! The crate evaluates a small JSONPath dialect against tree-shaped
//! documents: [`Getter`] extracts every value an expression reaches, keyed
//! by its canonical concrete path, and [`Updater`] produces a modified copy
//! of a document with values at given paths replaced, without mutating the
//! original. [`Template`] renders format strings with embedded path
//! expressions.
//!
//! Two document adapters are built in: schemaless [`Value`] trees and
//! schema-typed [`Record`]s. Anything implementing [`Document`] works.
//!
//! # Example
//!
//! ```
//! use jsonpick::{Document, Getter, Updater, Value};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let doc = Value::try_from(json!({
//!     "user": {"name": "ada", "tags": ["x", "y"]}
//! }))
//! .unwrap();
//!
//! // compiled once, reusable across documents and threads
//! let getter = Getter::new("$.user.tags[*]").unwrap();
//! let matches = getter.run(&doc).unwrap();
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches["$.user.tags[0]"].as_text(), Some("x"));
//!
//! let updater = Updater::new("$.user.name").unwrap();
//! let mut replacements = HashMap::new();
//! replacements.insert("$.user.name".to_string(), Value::from("grace"));
//! let updated = updater.run(&doc, &replacements).unwrap();
//!
//! assert_eq!(
//!     updated.get_field("user").and_then(|u| u.get_field("name")),
//!     Some(&Value::from("grace"))
//! );
//! // the original is untouched
//! assert_eq!(
//!     doc.get_field("user").and_then(|u| u.get_field("name")),
//!     Some(&Value::from("ada"))
//! );
//! ```

pub mod document;
pub mod jsonpath;
pub mod template;

pub use document::record::{FieldType, Record, RecordSchema, SchemaBuilder, TypedValue};
pub use document::value::Value;
pub use document::{Document, DocumentError, NodeKind};
pub use jsonpath::{
    EvalError, Getter, JsonPath, ParseError, ParseErrorKind, Parser, PathMap, PathStep, Updater,
    ROOT_PATH,
};
pub use template::{Template, TemplateError};
