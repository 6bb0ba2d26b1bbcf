//! Schema-typed records.
//!
//! A [`Record`] carries a shared [`RecordSchema`] declaring its field set
//! and each field's type; writes are validated against the declaration.
//! [`TypedValue`] is the node type the path engine walks: scalar leaves,
//! nested records, and typed arrays.
//!
//! # Example
//!
//! ```
//! use jsonpick::{FieldType, Record, RecordSchema, TypedValue};
//!
//! let schema = RecordSchema::builder()
//!     .field("name", FieldType::String)
//!     .field("count", FieldType::Int32)
//!     .build();
//!
//! let mut record = Record::new(schema);
//! record.put("name", TypedValue::String("a".to_string())).unwrap();
//! assert!(record.put("count", TypedValue::Bool(true)).is_err());
//! ```

use std::sync::Arc;

use indexmap::map::Entry;
use indexmap::IndexMap;

use super::{Document, DocumentError, NodeKind};

/// Declared type of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    String,
    Bytes,
    /// A nested record with its own schema.
    Record(Arc<RecordSchema>),
    /// An array whose elements share the given type.
    Array(Box<FieldType>),
    /// An arbitrarily keyed map. Representable but outside the set the
    /// engine can duplicate, so it cannot pass through the write path.
    Map(Box<FieldType>, Box<FieldType>),
}

impl FieldType {
    fn type_name(&self) -> &'static str {
        match self {
            FieldType::Int8 => "int8",
            FieldType::Int16 => "int16",
            FieldType::Int32 => "int32",
            FieldType::Int64 => "int64",
            FieldType::Float32 => "float32",
            FieldType::Float64 => "float64",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Bytes => "bytes",
            FieldType::Record(_) => "record",
            FieldType::Array(_) => "array",
            FieldType::Map(_, _) => "map",
        }
    }

    /// Whether the value conforms to this declared type.
    fn matches(&self, value: &TypedValue) -> bool {
        match (self, value) {
            (FieldType::Int8, TypedValue::Int8(_)) => true,
            (FieldType::Int16, TypedValue::Int16(_)) => true,
            (FieldType::Int32, TypedValue::Int32(_)) => true,
            (FieldType::Int64, TypedValue::Int64(_)) => true,
            (FieldType::Float32, TypedValue::Float32(_)) => true,
            (FieldType::Float64, TypedValue::Float64(_)) => true,
            (FieldType::Bool, TypedValue::Bool(_)) => true,
            (FieldType::String, TypedValue::String(_)) => true,
            (FieldType::Bytes, TypedValue::Bytes(_)) => true,
            (FieldType::Record(schema), TypedValue::Record(record)) => {
                **schema == *record.schema()
            }
            (FieldType::Array(element), TypedValue::Array(items)) => {
                items.iter().all(|item| element.matches(item))
            }
            (FieldType::Map(key, value_type), TypedValue::Map(entries)) => entries
                .iter()
                .all(|(k, v)| key.matches(k) && value_type.matches(v)),
            _ => false,
        }
    }
}

/// The declared field set of a record.
#[derive(Debug, PartialEq)]
pub struct RecordSchema {
    fields: IndexMap<String, FieldType>,
}

impl RecordSchema {
    /// Starts building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder {
            fields: IndexMap::new(),
        }
    }

    /// Looks up the declared type of a field.
    pub fn field(&self, name: &str) -> Option<&FieldType> {
        self.fields.get(name)
    }

    /// Iterates declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), ty))
    }
}

/// Builder for [`RecordSchema`].
pub struct SchemaBuilder {
    fields: IndexMap<String, FieldType>,
}

impl SchemaBuilder {
    /// Declares a field. Re-declaring a name replaces the earlier type.
    pub fn field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.insert(name.to_string(), field_type);
        self
    }

    /// Finishes the schema. Schemas are immutable and shared.
    pub fn build(self) -> Arc<RecordSchema> {
        Arc::new(RecordSchema {
            fields: self.fields,
        })
    }
}

/// A record instance: a schema plus the fields currently set.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<RecordSchema>,
    fields: IndexMap<String, TypedValue>,
}

impl Record {
    /// Creates an empty record for the given schema.
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        Self {
            schema,
            fields: IndexMap::new(),
        }
    }

    /// The record's schema.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Reads a field. `None` covers both unset and undeclared fields.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields.get(name)
    }

    /// Sets a field after validating the value against the declared type.
    pub fn put(&mut self, name: &str, value: TypedValue) -> Result<&mut TypedValue, DocumentError> {
        let Some(declared) = self.schema.field(name) else {
            return Err(DocumentError::UnknownField {
                field: name.to_string(),
            });
        };
        if !declared.matches(&value) {
            return Err(DocumentError::SchemaMismatch {
                field: name.to_string(),
                expected: declared.type_name().to_string(),
            });
        }
        match self.fields.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => Ok(entry.insert(value)),
        }
    }
}

/// A node in a schema-typed document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    Record(Record),
    Array(Vec<TypedValue>),
    Map(Vec<(TypedValue, TypedValue)>),
}

impl TypedValue {
    fn kind_name(&self) -> &'static str {
        match self {
            TypedValue::Int8(_) => "int8",
            TypedValue::Int16(_) => "int16",
            TypedValue::Int32(_) => "int32",
            TypedValue::Int64(_) => "int64",
            TypedValue::Float32(_) => "float32",
            TypedValue::Float64(_) => "float64",
            TypedValue::Bool(_) => "bool",
            TypedValue::String(_) => "string",
            TypedValue::Bytes(_) => "bytes",
            TypedValue::Record(_) => "record",
            TypedValue::Array(_) => "array",
            TypedValue::Map(_) => "map",
        }
    }
}

/// Duplicates a record, walking the declared fields the way the type-copy
/// whitelist allows: scalars by value, records recursively, arrays element
/// by element. Map-typed fields and nested arrays have no safe duplication
/// and fail with the offending field named.
fn copy_record(record: &Record) -> Result<Record, DocumentError> {
    let mut copied = Record::new(Arc::clone(&record.schema));
    for (name, declared) in record.schema.fields.iter() {
        let Some(value) = record.fields.get(name) else {
            continue;
        };
        let duplicated = copy_value(name, declared, value)?;
        copied.fields.insert(name.clone(), duplicated);
    }
    Ok(copied)
}

fn copy_value(
    field: &str,
    declared: &FieldType,
    value: &TypedValue,
) -> Result<TypedValue, DocumentError> {
    match declared {
        FieldType::Int8
        | FieldType::Int16
        | FieldType::Int32
        | FieldType::Int64
        | FieldType::Float32
        | FieldType::Float64
        | FieldType::Bool
        | FieldType::String
        | FieldType::Bytes => Ok(value.clone()),
        FieldType::Record(_) => match value {
            TypedValue::Record(record) => Ok(TypedValue::Record(copy_record(record)?)),
            other => Err(DocumentError::UnsupportedType {
                field: field.to_string(),
                found: other.kind_name().to_string(),
            }),
        },
        FieldType::Array(element) => match value {
            TypedValue::Array(items) => {
                let mut copied = Vec::with_capacity(items.len());
                for item in items {
                    copied.push(copy_element(field, element, item)?);
                }
                Ok(TypedValue::Array(copied))
            }
            other => Err(DocumentError::UnsupportedType {
                field: field.to_string(),
                found: other.kind_name().to_string(),
            }),
        },
        FieldType::Map(_, _) => Err(DocumentError::UnsupportedType {
            field: field.to_string(),
            found: "map".to_string(),
        }),
    }
}

fn copy_element(
    field: &str,
    element: &FieldType,
    value: &TypedValue,
) -> Result<TypedValue, DocumentError> {
    match element {
        FieldType::Record(_) => match value {
            TypedValue::Record(record) => Ok(TypedValue::Record(copy_record(record)?)),
            other => Err(DocumentError::UnsupportedType {
                field: field.to_string(),
                found: other.kind_name().to_string(),
            }),
        },
        // nested arrays and maps are outside the element whitelist
        FieldType::Array(_) | FieldType::Map(_, _) => Err(DocumentError::UnsupportedType {
            field: field.to_string(),
            found: element.type_name().to_string(),
        }),
        _ => Ok(value.clone()),
    }
}

impl Document for TypedValue {
    fn kind(&self) -> NodeKind {
        match self {
            TypedValue::Record(_) => NodeKind::Object,
            TypedValue::Array(_) => NodeKind::Array,
            _ => NodeKind::Scalar,
        }
    }

    fn get_field(&self, name: &str) -> Option<&Self> {
        match self {
            TypedValue::Record(record) => record.fields.get(name),
            _ => None,
        }
    }

    fn get_field_mut(&mut self, name: &str) -> Option<&mut Self> {
        match self {
            TypedValue::Record(record) => record.fields.get_mut(name),
            _ => None,
        }
    }

    fn has_field(&self, name: &str) -> bool {
        // closed-world: only declared fields are addressable
        match self {
            TypedValue::Record(record) => record.schema.field(name).is_some(),
            _ => false,
        }
    }

    fn put_field(&mut self, name: &str, value: Self) -> Result<&mut Self, DocumentError> {
        let found = self.kind();
        match self {
            TypedValue::Record(record) => record.put(name, value),
            _ => Err(DocumentError::NotAnObject { found }),
        }
    }

    fn elements(&self) -> Option<&[Self]> {
        match self {
            TypedValue::Array(items) => Some(items),
            _ => None,
        }
    }

    fn elements_mut(&mut self) -> Option<&mut [Self]> {
        match self {
            TypedValue::Array(items) => Some(items),
            _ => None,
        }
    }

    fn deep_copy(&self) -> Result<Self, DocumentError> {
        match self {
            TypedValue::Record(record) => Ok(TypedValue::Record(copy_record(record)?)),
            TypedValue::Array(items) => {
                let mut copied = Vec::with_capacity(items.len());
                for item in items {
                    copied.push(item.deep_copy()?);
                }
                Ok(TypedValue::Array(copied))
            }
            TypedValue::Map(_) => Err(DocumentError::UnsupportedType {
                field: "$".to_string(),
                found: "map".to_string(),
            }),
            other => Ok(other.clone()),
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }
}
