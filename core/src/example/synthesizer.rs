//! # Example Synthesis
//!
//! Deterministically produces one representative value for a resolved schema.
//!
//! Value selection precedence, highest first:
//! 1. literal `example`
//! 2. literal `default`
//! 3. first `enum` value
//! 4. a type/format heuristic
//!
//! No randomness or clock reads are involved: the same schema always yields
//! the same value.

use crate::schema::{Schema, SchemaKind, SchemaNode};
use serde_json::{json, Map, Value};

/// A synthesized example value tree.
pub type ExampleValue = Value;

/// Fixed timestamp used for every `date-time` string.
pub const SENTINEL_DATE_TIME: &str = "2025-01-01T00:00:00Z";
/// Fixed date used for every `date` string.
pub const SENTINEL_DATE: &str = "2025-01-01";
/// Fixed UUID used for every `uuid` string.
pub const SENTINEL_UUID: &str = "123e4567-e89b-12d3-a456-426614174000";
/// Representative integer.
pub const SAMPLE_INTEGER: i64 = 123;
/// Representative fractional number.
pub const SAMPLE_NUMBER: f64 = 1.23;
/// Literal used when nothing is known about the schema.
pub const GENERIC_PLACEHOLDER: &str = "value";

/// Synthesizes the top-level example of a schema.
pub fn example_for(node: &SchemaNode) -> ExampleValue {
    synthesize(node, "", 0)
}

/// Synthesizes an example for `node`, reached through `field_name` at `depth`.
///
/// `depth` grows by one on every descent into a property or array item.
/// Arrays at depth 0 or 1 show two identical items, deeper arrays one.
pub fn synthesize(node: &SchemaNode, field_name: &str, depth: usize) -> ExampleValue {
    let Some(schema) = node.as_schema() else {
        // A pointer that never went through the resolver.
        return Value::Object(Map::new());
    };

    if let Some(example) = &schema.example {
        return example.clone();
    }
    if let Some(default) = &schema.default {
        return default.clone();
    }
    if let Some(first) = schema.enum_values.first() {
        return first.clone();
    }

    match schema.kind {
        SchemaKind::String => Value::String(string_example(schema.format.as_deref(), field_name)),
        SchemaKind::Integer => json!(SAMPLE_INTEGER),
        SchemaKind::Number => json!(SAMPLE_NUMBER),
        SchemaKind::Boolean => Value::Bool(true),
        SchemaKind::Null => Value::Null,
        SchemaKind::Array => array_example(schema, field_name, depth),
        SchemaKind::Object | SchemaKind::Unresolved => Value::Object(object_fields(schema, depth)),
        SchemaKind::OneOf | SchemaKind::AnyOf => alternative_example(schema, field_name, depth),
        SchemaKind::AllOf => all_of_example(schema, field_name, depth),
        SchemaKind::Unknown if schema.is_object_like() => {
            Value::Object(object_fields(schema, depth))
        }
        SchemaKind::Unknown => Value::String(GENERIC_PLACEHOLDER.to_string()),
    }
}

fn string_example(format: Option<&str>, field_name: &str) -> String {
    let fixed = match format {
        Some("date-time") => SENTINEL_DATE_TIME,
        Some("date") => SENTINEL_DATE,
        Some("time") => "12:00:00",
        Some("email") => "user@example.com",
        Some("uuid") => SENTINEL_UUID,
        Some("uri") | Some("url") => "https://example.com",
        Some("hostname") => "example.com",
        Some("ipv4") => "192.0.2.1",
        Some("ipv6") => "2001:db8::1",
        Some("byte") => "ZXhhbXBsZQ==",
        Some("password") => "********",
        _ if field_name.is_empty() => "string",
        _ => return format!("{}_sample", field_name),
    };
    fixed.to_string()
}

fn array_example(schema: &Schema, field_name: &str, depth: usize) -> Value {
    let item = match &schema.items {
        Some(items) => synthesize(items, field_name, depth + 1),
        None => Value::String(GENERIC_PLACEHOLDER.to_string()),
    };
    if depth <= 1 {
        Value::Array(vec![item.clone(), item])
    } else {
        Value::Array(vec![item])
    }
}

fn object_fields(schema: &Schema, depth: usize) -> Map<String, Value> {
    schema
        .properties
        .iter()
        .map(|(name, prop)| (name.clone(), synthesize(prop, name, depth + 1)))
        .collect()
}

/// First alternative, with any sibling properties laid underneath it.
fn alternative_example(schema: &Schema, field_name: &str, depth: usize) -> Value {
    let chosen = schema
        .composed_of
        .first()
        .map(|first| synthesize(first, field_name, depth));
    if schema.properties.is_empty() {
        return chosen.unwrap_or_else(|| Value::String(GENERIC_PLACEHOLDER.to_string()));
    }

    let mut fields = object_fields(schema, depth);
    if let Some(Value::Object(alternative)) = chosen {
        fields.extend(alternative);
    }
    Value::Object(fields)
}

/// Best effort for compositions handed in without resolution: part mappings merge.
fn all_of_example(schema: &Schema, field_name: &str, depth: usize) -> Value {
    let mut merged = Map::new();
    let mut last = None;
    for part in &schema.composed_of {
        match synthesize(part, field_name, depth) {
            Value::Object(map) => merged.extend(map),
            other => last = Some(other),
        }
    }
    match last {
        Some(value) if merged.is_empty() => value,
        _ => Value::Object(merged),
    }
}
