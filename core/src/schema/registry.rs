//! # Schema Registry
//!
//! Stores the `components/schemas` of one loaded document, keyed by name.
//! The registry is built once per document load and is read-only afterwards;
//! resolution and synthesis only ever borrow it.

use crate::error::{AppError, AppResult};
use crate::oas::normalization::schema_from_value;
use crate::oas::ref_utils::{component_pointer, extract_component_name};
use crate::schema::SchemaNode;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Component section holding schema definitions.
pub const SCHEMAS_SECTION: &str = "schemas";

/// Registry of named component schemas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, SchemaNode>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from a raw `components` object.
    ///
    /// A missing `schemas` section yields an empty registry; a `schemas`
    /// value that is not a mapping is a malformed document.
    pub fn from_components(components: Option<&JsonValue>) -> AppResult<Self> {
        let Some(components) = components else {
            return Ok(Self::new());
        };
        let components = components.as_object().ok_or_else(|| {
            AppError::MalformedDocument("'components' must be a mapping".into())
        })?;

        match components.get(SCHEMAS_SECTION) {
            None | Some(JsonValue::Null) => Ok(Self::new()),
            Some(JsonValue::Object(raw)) => Ok(raw
                .iter()
                .map(|(name, schema)| (name.clone(), schema_from_value(schema)))
                .collect()),
            Some(_) => Err(AppError::MalformedDocument(
                "'components.schemas' must be a mapping".into(),
            )),
        }
    }

    /// Returns a schema by component name.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.schemas.get(name)
    }

    /// Looks up the target of a `#/components/schemas/<name>` pointer.
    ///
    /// Returns the component name together with its definition, or
    /// `UnresolvedReference` if the pointer names nothing in this registry.
    pub fn lookup(&self, pointer: &str) -> AppResult<(&str, &SchemaNode)> {
        extract_component_name(pointer, SCHEMAS_SECTION)
            .and_then(|name| self.schemas.get_key_value(name.as_str()))
            .map(|(name, node)| (name.as_str(), node))
            .ok_or_else(|| AppError::UnresolvedReference(pointer.to_string()))
    }

    /// Returns the pointer referencing the named component.
    pub fn pointer_for(name: &str) -> String {
        component_pointer(SCHEMAS_SECTION, name)
    }

    /// Iterates over `(name, schema)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.schemas.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Component names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl FromIterator<(String, SchemaNode)> for SchemaRegistry {
    fn from_iter<T: IntoIterator<Item = (String, SchemaNode)>>(iter: T) -> Self {
        SchemaRegistry {
            schemas: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;
    use serde_json::json;

    #[test]
    fn test_registry_from_components() {
        let components = json!({
            "schemas": {
                "User": {"type": "object", "properties": {"id": {"type": "integer"}}},
                "Tag": {"type": "string"}
            }
        });
        let registry = SchemaRegistry::from_components(Some(&components)).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["User", "Tag"]);

        let (name, node) = registry.lookup("#/components/schemas/Tag").unwrap();
        assert_eq!(name, "Tag");
        assert_eq!(node.as_schema().unwrap().kind, SchemaKind::String);
    }

    #[test]
    fn test_registry_missing_sections() {
        assert!(SchemaRegistry::from_components(None).unwrap().is_empty());
        let components = json!({"securitySchemes": {}});
        assert!(SchemaRegistry::from_components(Some(&components))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_registry_rejects_non_mapping_schemas() {
        let components = json!({"schemas": ["User"]});
        let err = SchemaRegistry::from_components(Some(&components)).unwrap_err();
        assert!(matches!(err, AppError::MalformedDocument(_)));
    }

    #[test]
    fn test_lookup_unknown_pointer() {
        let registry = SchemaRegistry::new();
        let err = registry.lookup("#/components/schemas/Ghost").unwrap_err();
        match err {
            AppError::UnresolvedReference(pointer) => {
                assert_eq!(pointer, "#/components/schemas/Ghost")
            }
            other => panic!("unexpected error {:?}", other),
        }

        let err = registry.lookup("#/definitions/Ghost").unwrap_err();
        assert!(matches!(err, AppError::UnresolvedReference(_)));
    }
}
