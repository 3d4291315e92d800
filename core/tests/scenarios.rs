use docgen_core::{
    example_for, mutate, parse_openapi_value, reconcile, schema_from_value, EndpointCatalog,
    EndpointDescriptor, HttpMethod, InventoryKey, Placeholder, SchemaRegistry, SchemaResolver,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeSet;

fn keys(specs: &[&str]) -> BTreeSet<InventoryKey> {
    specs.iter().map(|s| s.parse().unwrap()).collect()
}

#[test]
fn test_uuid_object_example() {
    let node = schema_from_value(&json!({
        "type": "object",
        "required": ["id"],
        "properties": {
            "id": {"type": "string", "format": "uuid"},
            "age": {"type": "integer"}
        }
    }));
    let rendered = serde_json::to_string(&example_for(&node)).unwrap();
    assert_eq!(
        rendered,
        r#"{"id":"123e4567-e89b-12d3-a456-426614174000","age":123}"#
    );
}

#[test]
fn test_multi_tag_fan_out() {
    let endpoints = vec![
        EndpointDescriptor::new(HttpMethod::Get, "/leaderboard").with_tags(["games", "public"]),
    ];
    let catalog = EndpointCatalog::group(&endpoints);

    assert_eq!(catalog.tags().collect::<Vec<_>>(), vec!["games", "public"]);
    assert_eq!(catalog.endpoints("games").len(), 1);
    assert_eq!(catalog.endpoints("public").len(), 1);
    assert_eq!(catalog.endpoints("games")[0].path, "/leaderboard");
}

#[test]
fn test_health_and_score_inventory() {
    let a = keys(&["GET /health"]);
    let b = keys(&["GET /health", "POST /score"]);

    let report = reconcile(&a, &b);
    assert_eq!(report.only_in_a, Vec::<InventoryKey>::new());
    assert_eq!(report.only_in_b, vec![InventoryKey::new("POST", "/score")]);
    assert_eq!(reconcile(&b, &a), report.swap());
}

#[test]
fn test_all_of_merge_through_document() {
    let doc = parse_openapi_value(&json!({
        "components": {
            "schemas": {
                "Part1": {"required": ["a"], "properties": {"a": {"type": "integer"}}},
                "Part2": {"required": ["b"], "properties": {"b": {"type": "string"}}},
                "Both": {
                    "allOf": [
                        {"$ref": "#/components/schemas/Part1"},
                        {"$ref": "#/components/schemas/Part2"}
                    ]
                }
            }
        }
    }))
    .unwrap();

    let resolver = SchemaResolver::new(&doc.registry);
    let merged = resolver.resolve_named("Both");
    let schema = merged.as_schema().unwrap();

    let required: Vec<&str> = schema.required.iter().map(String::as_str).collect();
    assert_eq!(required, vec!["a", "b"]);
    assert!(schema.properties.contains_key("a"));
    assert!(schema.properties.contains_key("b"));
    assert_eq!(example_for(&merged), json!({"a": 123, "b": "b_sample"}));
}

#[test]
fn test_self_reference_is_finite() {
    let registry: SchemaRegistry = [(
        "A".to_string(),
        schema_from_value(&json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "self": {"$ref": "#/components/schemas/A"}
            }
        })),
    )]
    .into_iter()
    .collect();

    let resolver = SchemaResolver::new(&registry);
    let resolved = resolver.resolve_named("A");
    let inner = &resolved.as_schema().unwrap().properties["self"];
    assert_eq!(inner.placeholder(), Some(Placeholder::Cycle));
    assert_eq!(
        example_for(&resolved),
        json!({"name": "name_sample", "self": {}})
    );

    let again = resolver.resolve(&resolved);
    assert_eq!(again, resolved);
}

#[test]
fn test_mutation_always_three_distinct() {
    let schemas = [
        json!({"type": "object", "required": ["id"], "properties": {"id": {"type": "integer"}}}),
        json!({"type": "string", "format": "email"}),
        json!({"type": "array", "items": {"type": "boolean"}}),
        json!({}),
    ];
    for schema in schemas {
        let node = schema_from_value(&schema);
        let valid = example_for(&node);
        let variants = mutate(&node);
        assert_eq!(variants.len(), 3);
        assert!(variants.iter().all(|v| v.value != valid), "schema {}", schema);
    }
}
