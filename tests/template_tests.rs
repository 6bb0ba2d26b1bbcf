//! End-to-end tests for the template formatter.

use jsonpick::{FieldType, Record, RecordSchema, Template, TemplateError, TypedValue, Value};
use serde_json::json;
use std::sync::Arc;

fn schemaless_message() -> Value {
    Value::try_from(json!({
        "text": "top",
        "struct": {
            "sub_text": "sub",
            "arr": ["a0", "a1", "a2"]
        }
    }))
    .unwrap()
}

fn nested_schema() -> Arc<RecordSchema> {
    RecordSchema::builder()
        .field("sub_text", FieldType::String)
        .field("arr", FieldType::Array(Box::new(FieldType::String)))
        .build()
}

fn typed_message() -> TypedValue {
    let mut nested = Record::new(nested_schema());
    nested
        .put("sub_text", TypedValue::String("sub".to_string()))
        .unwrap();
    nested
        .put(
            "arr",
            TypedValue::Array(
                (0..3)
                    .map(|i| TypedValue::String(format!("a{}", i)))
                    .collect(),
            ),
        )
        .unwrap();

    let schema = RecordSchema::builder()
        .field("text", FieldType::String)
        .field("struct", FieldType::Record(nested_schema()))
        .build();
    let mut root = Record::new(schema);
    root.put("text", TypedValue::String("top".to_string()))
        .unwrap();
    root.put("struct", TypedValue::Record(nested)).unwrap();
    TypedValue::Record(root)
}

#[test]
fn test_render_mixes_literals_and_extracted_values() {
    let template = Template::compile("lit1-{ $.struct.arr[0] }-lit2-{$.struct.arr[2]}").unwrap();
    assert_eq!(
        template.render(&schemaless_message()).unwrap(),
        "lit1-a0-lit2-a2"
    );
    assert_eq!(template.render(&typed_message()).unwrap(), "lit1-a0-lit2-a2");
}

#[test]
fn test_render_whitespace_in_placeholders_is_trimmed() {
    let template = Template::compile("{   $.text   }").unwrap();
    assert_eq!(template.render(&schemaless_message()).unwrap(), "top");
}

#[test]
fn test_render_is_reusable_across_documents() {
    let template = Template::compile("dest-{ $.struct.sub_text }").unwrap();
    assert_eq!(template.render(&schemaless_message()).unwrap(), "dest-sub");
    assert_eq!(template.render(&typed_message()).unwrap(), "dest-sub");
    // and repeatable on the same document
    assert_eq!(template.render(&schemaless_message()).unwrap(), "dest-sub");
}

#[test]
fn test_render_wildcard_picks_smallest_canonical_path() {
    let template = Template::compile("{ $.struct.arr[*] }").unwrap();
    assert_eq!(template.render(&schemaless_message()).unwrap(), "a0");
    assert_eq!(template.render(&typed_message()).unwrap(), "a0");
}

#[test]
fn test_render_unmatched_placeholder_fails() {
    let template = Template::compile("{ $.missing }").unwrap();
    let err = template.render(&schemaless_message()).unwrap_err();
    assert!(matches!(err, TemplateError::NoMatch { expression } if expression == "$.missing"));
}

#[test]
fn test_render_non_string_match_fails() {
    let doc = Value::try_from(json!({"n": 1})).unwrap();
    let template = Template::compile("{ $.n }").unwrap();
    assert!(matches!(
        template.render(&doc).unwrap_err(),
        TemplateError::NotText { .. }
    ));
}

#[test]
fn test_compile_rejects_bad_placeholder_path() {
    let err = Template::compile("{ $$ }").unwrap_err();
    assert!(matches!(err, TemplateError::InvalidPath { .. }));
}

#[test]
fn test_render_traversal_error_propagates() {
    let template = Template::compile("{ $.text.deeper }").unwrap();
    let err = template.render(&schemaless_message()).unwrap_err();
    assert!(matches!(err, TemplateError::Eval { .. }));
}
