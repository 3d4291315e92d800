//! # Payload Mutation
//!
//! Derives exactly three structurally invalid variants from a schema's valid
//! example: a missing required field, a corrupted field type, and an
//! unexpected extra field. Degenerate inputs fall back to fixed sentinels so
//! the count never drops below three.

use crate::example::synthesizer::{example_for, ExampleValue};
use crate::schema::{Schema, SchemaNode};
use serde::Serialize;
use serde_json::{Map, Value};

/// Key injected by the unexpected-field variant.
pub const UNEXPECTED_FIELD: &str = "unexpected_field";
/// Scalar that replaces a mapping-valued field.
pub const SCALAR_PLACEHOLDER: &str = "unexpected_scalar";
/// Literal substituted when the valid example is not a mapping.
pub const WRONG_TYPE_LITERAL: &str = "wrong_type";

/// Which rule produced an invalid variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationKind {
    /// The first declared required field is dropped.
    MissingRequired,
    /// The first field flips between mapping and scalar.
    TypeCorruption,
    /// An undeclared field is added.
    UnexpectedField,
}

/// One invalid payload variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidVariant {
    /// The rule that produced it.
    pub kind: MutationKind,
    /// The invalid payload.
    pub value: ExampleValue,
}

/// Produces the three invalid variants for a resolved schema.
pub fn mutate(node: &SchemaNode) -> [InvalidVariant; 3] {
    let valid = example_for(node);
    mutate_example(node.as_schema(), &valid)
}

/// Produces the three invalid variants from an already synthesized example.
pub fn mutate_example(schema: Option<&Schema>, valid: &ExampleValue) -> [InvalidVariant; 3] {
    [
        InvalidVariant {
            kind: MutationKind::MissingRequired,
            value: distinct(missing_required(schema, valid), valid),
        },
        InvalidVariant {
            kind: MutationKind::TypeCorruption,
            value: distinct(corrupt_first_field(valid), valid),
        },
        InvalidVariant {
            kind: MutationKind::UnexpectedField,
            value: distinct(inject_unexpected_field(schema, valid), valid),
        },
    ]
}

/// Drops the first declared required field; `null` when nothing is required.
fn missing_required(schema: Option<&Schema>, valid: &Value) -> Value {
    let first_required = schema.and_then(|s| s.required.first());
    match (valid, first_required) {
        (Value::Object(map), Some(field)) => {
            let mut map = map.clone();
            map.shift_remove(field.as_str());
            Value::Object(map)
        }
        _ => Value::Null,
    }
}

/// Flips the structural category of the first field.
fn corrupt_first_field(valid: &Value) -> Value {
    let first = valid
        .as_object()
        .and_then(|map| map.iter().next().map(|(key, value)| (map, key, value)));
    let Some((map, first_key, first_value)) = first else {
        return single_entry(UNEXPECTED_FIELD, "unexpected");
    };

    let replacement = if first_value.is_object() {
        Value::String(SCALAR_PLACEHOLDER.to_string())
    } else {
        single_entry("unexpected", "object")
    };

    let mut map = map.clone();
    map.insert(first_key.clone(), replacement);
    Value::Object(map)
}

fn single_entry(key: &str, value: &str) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), Value::String(value.to_string()));
    Value::Object(map)
}

/// Adds one key the schema does not declare.
fn inject_unexpected_field(schema: Option<&Schema>, valid: &Value) -> Value {
    let Value::Object(map) = valid else {
        return Value::String(WRONG_TYPE_LITERAL.to_string());
    };

    let key = unused_key(schema, map);
    let mut map = map.clone();
    map.insert(key, Value::String("unexpected".to_string()));
    Value::Object(map)
}

fn unused_key(schema: Option<&Schema>, map: &Map<String, Value>) -> String {
    let taken =
        |key: &str| map.contains_key(key) || schema.is_some_and(|s| s.properties.contains_key(key));

    let mut key = UNEXPECTED_FIELD.to_string();
    let mut suffix = 1;
    while taken(&key) {
        key = format!("{}_{}", UNEXPECTED_FIELD, suffix);
        suffix += 1;
    }
    key
}

/// Wraps a candidate equal to the valid value in a sequence so it always differs.
fn distinct(candidate: Value, valid: &Value) -> Value {
    if &candidate == valid {
        Value::Array(vec![candidate])
    } else {
        candidate
    }
}
