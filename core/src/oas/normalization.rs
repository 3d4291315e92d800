//! # OpenAPI Normalization
//!
//! Converts raw schema JSON into [`SchemaNode`] trees, smoothing over the
//! differences between OpenAPI 3.0 and 3.1 spellings:
//!
//! - boolean schemas (`true` / `false`) carry no structure and become empty schemas
//! - `type: [T, "null"]` unions collapse to their first non-null member
//! - `const` becomes a single-value `enum`
//! - `examples: [...]` supplies the literal example when `example` is absent

use crate::schema::{Schema, SchemaKind, SchemaNode};
use serde_json::{Map, Value};

/// Converts a raw schema value into a node. Never fails: junk becomes an unknown schema.
pub fn schema_from_value(value: &Value) -> SchemaNode {
    let Value::Object(map) = value else {
        return SchemaNode::default();
    };

    if let Some(pointer) = map.get("$ref").and_then(Value::as_str) {
        return SchemaNode::reference(pointer);
    }

    let kind = infer_kind(map);
    let mut schema = Schema::of_kind(kind);

    schema.description = string_field(map, "description");
    schema.format = string_field(map, "format");

    if let Some(Value::Object(props)) = map.get("properties") {
        schema.properties = props
            .iter()
            .map(|(name, prop)| (name.clone(), schema_from_value(prop)))
            .collect();
    }

    if let Some(Value::Array(required)) = map.get("required") {
        schema.required = required
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
    }

    schema.items = map.get("items").map(schema_from_value);

    let composition_key = match kind {
        SchemaKind::AllOf => Some("allOf"),
        SchemaKind::OneOf => Some("oneOf"),
        SchemaKind::AnyOf => Some("anyOf"),
        _ => None,
    };
    if let Some(Value::Array(parts)) = composition_key.and_then(|key| map.get(key)) {
        schema.composed_of = parts.iter().map(schema_from_value).collect();
    }

    schema.enum_values = match (map.get("enum"), map.get("const")) {
        (Some(Value::Array(values)), _) => values.clone(),
        (_, Some(constant)) => vec![constant.clone()],
        _ => Vec::new(),
    };

    schema.example = map.get("example").cloned().or_else(|| {
        map.get("examples")
            .and_then(Value::as_array)
            .and_then(|examples| examples.first())
            .cloned()
    });
    schema.default = map.get("default").cloned();

    SchemaNode::inline(schema)
}

fn infer_kind(map: &Map<String, Value>) -> SchemaKind {
    if map.contains_key("allOf") {
        return SchemaKind::AllOf;
    }
    if map.contains_key("oneOf") {
        return SchemaKind::OneOf;
    }
    if map.contains_key("anyOf") {
        return SchemaKind::AnyOf;
    }

    match map.get("type") {
        Some(Value::String(name)) => return SchemaKind::from_type_name(name),
        Some(Value::Array(names)) => {
            let first = names
                .iter()
                .filter_map(Value::as_str)
                .find(|name| *name != "null");
            return first.map_or(SchemaKind::Null, SchemaKind::from_type_name);
        }
        _ => {}
    }

    if map.contains_key("properties") || map.contains_key("additionalProperties") {
        return SchemaKind::Object;
    }
    if map.contains_key("items") {
        return SchemaKind::Array;
    }

    let literal = map.get("const").or_else(|| {
        map.get("enum")
            .and_then(Value::as_array)
            .and_then(|values| values.first())
    });
    literal.map_or(SchemaKind::Unknown, infer_literal_kind)
}

fn infer_literal_kind(value: &Value) -> SchemaKind {
    match value {
        Value::String(_) => SchemaKind::String,
        Value::Bool(_) => SchemaKind::Boolean,
        Value::Number(num) => {
            if num.is_i64() || num.is_u64() {
                SchemaKind::Integer
            } else {
                SchemaKind::Number
            }
        }
        Value::Array(_) => SchemaKind::Array,
        Value::Object(_) => SchemaKind::Object,
        Value::Null => SchemaKind::Null,
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}
