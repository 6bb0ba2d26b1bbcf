//! Schemaless document values.
//!
//! [`Value`] represents dynamically typed tree data: nested keyed objects,
//! ordered arrays, and a closed set of scalar leaves. Objects preserve
//! insertion order via `IndexMap`, though the path engine never relies on
//! field order.
//!
//! # Example
//!
//! ```
//! use indexmap::IndexMap;
//! use jsonpick::{Document, Value};
//!
//! let mut fields = IndexMap::new();
//! fields.insert("name".to_string(), Value::from("jsonpick"));
//! fields.insert("stars".to_string(), Value::from(3i64));
//! let doc = Value::Object(fields);
//!
//! assert!(doc.get_field("name").is_some());
//! assert!(doc.get_field("missing").is_none());
//! ```

use indexmap::map::Entry;
use indexmap::IndexMap;

use super::{Document, DocumentError, NodeKind};

/// A dynamically typed document node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    /// A named-field container with unique keys.
    Object(IndexMap<String, Value>),
    /// An ordered container; elements need not share a type.
    Array(Vec<Value>),
}

impl Value {
    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this value is a scalar leaf.
    pub fn is_scalar(&self) -> bool {
        !self.is_object() && !self.is_array()
    }
}

impl Document for Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            _ => NodeKind::Scalar,
        }
    }

    fn get_field(&self, name: &str) -> Option<&Self> {
        match self {
            Value::Object(fields) => fields.get(name),
            _ => None,
        }
    }

    fn get_field_mut(&mut self, name: &str) -> Option<&mut Self> {
        match self {
            Value::Object(fields) => fields.get_mut(name),
            _ => None,
        }
    }

    fn has_field(&self, _name: &str) -> bool {
        // open-world: any field name can be written into an object
        self.is_object()
    }

    fn put_field(&mut self, name: &str, value: Self) -> Result<&mut Self, DocumentError> {
        let found = self.kind();
        let Value::Object(fields) = self else {
            return Err(DocumentError::NotAnObject { found });
        };
        match fields.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => Ok(entry.insert(value)),
        }
    }

    fn elements(&self) -> Option<&[Self]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    fn elements_mut(&mut self) -> Option<&mut [Self]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    fn deep_copy(&self) -> Result<Self, DocumentError> {
        // the closed enum makes every node duplicable; Clone recurses and
        // copies byte sequences by value
        Ok(self.clone())
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = DocumentError;

    /// Converts parsed JSON into a schemaless document. Integers become
    /// `Int64` and floats `Float64`. Null object members are dropped, the
    /// same way the copy whitelist skips unset fields; a null anywhere else
    /// has no scalar representation and is rejected.
    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        from_json("$", json)
    }
}

fn from_json(field: &str, json: serde_json::Value) -> Result<Value, DocumentError> {
    match json {
        serde_json::Value::Null => Err(DocumentError::UnsupportedType {
            field: field.to_string(),
            found: "null".to_string(),
        }),
        serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int64(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float64(f))
            } else {
                Err(DocumentError::UnsupportedType {
                    field: field.to_string(),
                    found: format!("number {}", n),
                })
            }
        }
        serde_json::Value::String(s) => Ok(Value::String(s)),
        serde_json::Value::Array(items) => {
            let mut elements = Vec::with_capacity(items.len());
            for item in items {
                elements.push(from_json(field, item)?);
            }
            Ok(Value::Array(elements))
        }
        serde_json::Value::Object(members) => {
            let mut fields = IndexMap::new();
            for (name, member) in members {
                if member.is_null() {
                    continue;
                }
                let converted = from_json(&name, member)?;
                fields.insert(name, converted);
            }
            Ok(Value::Object(fields))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Value::from("s").kind(), NodeKind::Scalar);
        assert_eq!(Value::Bytes(vec![1, 2]).kind(), NodeKind::Scalar);
        assert_eq!(Value::Object(IndexMap::new()).kind(), NodeKind::Object);
        assert_eq!(Value::Array(vec![]).kind(), NodeKind::Array);
    }

    #[test]
    fn test_get_field_absent_is_none() {
        let doc = Value::try_from(json!({"text": "t"})).unwrap();
        assert!(doc.get_field("text").is_some());
        assert!(doc.get_field("missing").is_none());
        assert!(Value::from(1i64).get_field("text").is_none());
    }

    #[test]
    fn test_put_field_inserts_and_replaces() {
        let mut doc = Value::Object(IndexMap::new());
        doc.put_field("a", Value::from("first")).unwrap();
        let slot = doc.put_field("a", Value::from("second")).unwrap();
        assert_eq!(slot, &mut Value::from("second"));
        assert_eq!(doc.get_field("a"), Some(&Value::from("second")));
    }

    #[test]
    fn test_put_field_on_scalar_fails() {
        let mut doc = Value::from(42i64);
        let err = doc.put_field("a", Value::from("x")).unwrap_err();
        assert_eq!(
            err,
            DocumentError::NotAnObject {
                found: NodeKind::Scalar
            }
        );
    }

    #[test]
    fn test_deep_copy_duplicates_bytes() {
        let doc = Value::try_from(json!({"arr": [1, 2]})).unwrap();
        let copy = doc.deep_copy().unwrap();
        assert_eq!(doc, copy);

        let mut original = Value::Bytes(vec![0x10, 0x20]);
        let copied = original.deep_copy().unwrap();
        if let Value::Bytes(b) = &mut original {
            b[0] = 0xff;
        }
        assert_eq!(copied, Value::Bytes(vec![0x10, 0x20]));
    }

    #[test]
    fn test_from_json_numbers() {
        let doc = Value::try_from(json!({"i": 7, "f": 1.5})).unwrap();
        assert_eq!(doc.get_field("i"), Some(&Value::Int64(7)));
        assert_eq!(doc.get_field("f"), Some(&Value::Float64(1.5)));
    }

    #[test]
    fn test_from_json_drops_null_members() {
        let doc = Value::try_from(json!({"keep": "v", "drop": null})).unwrap();
        assert!(doc.get_field("keep").is_some());
        assert!(doc.get_field("drop").is_none());
    }

    #[test]
    fn test_from_json_rejects_null_elements() {
        let err = Value::try_from(json!({"arr": ["a", null]})).unwrap_err();
        assert_eq!(
            err,
            DocumentError::UnsupportedType {
                field: "arr".to_string(),
                found: "null".to_string(),
            }
        );
    }

    #[test]
    fn test_as_text() {
        assert_eq!(Value::from("hi").as_text(), Some("hi"));
        assert_eq!(Value::from(1i64).as_text(), None);
    }
}
