//! # Schema Nodes
//!
//! Tagged-variant representation of OpenAPI schema objects.
//!
//! A [`SchemaNode`] is either a pointer awaiting resolution or an inline
//! [`Schema`] body. Once handed through the resolver, every nested node is
//! inline and `allOf` compositions are flattened away.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;

/// The structural discriminant of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaKind {
    /// `type: string`
    String,
    /// `type: integer`
    Integer,
    /// `type: number`
    Number,
    /// `type: boolean`
    Boolean,
    /// `type: null` (OAS 3.1)
    Null,
    /// `type: object`, or inferred from `properties`.
    Object,
    /// `type: array`, or inferred from `items`.
    Array,
    /// `oneOf` alternatives.
    OneOf,
    /// `anyOf` alternatives.
    AnyOf,
    /// `allOf` composition (never present after resolution).
    AllOf,
    /// Stand-in for a pointer that names no registered schema.
    Unresolved,
    /// No usable type information.
    #[default]
    Unknown,
}

impl SchemaKind {
    /// Maps a JSON Schema `type` keyword value to a kind.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "string" => SchemaKind::String,
            "integer" => SchemaKind::Integer,
            "number" => SchemaKind::Number,
            "boolean" => SchemaKind::Boolean,
            "null" => SchemaKind::Null,
            "object" => SchemaKind::Object,
            "array" => SchemaKind::Array,
            _ => SchemaKind::Unknown,
        }
    }
}

/// Marks a schema substituted by the resolver instead of a real definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placeholder {
    /// Opaque object standing in for a self-referential pointer.
    Cycle,
    /// Empty object standing in for a pointer absent from the registry.
    Unresolved,
}

/// A resolved or resolvable schema definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Structural discriminant.
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Format hint (`date-time`, `uuid`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Declared properties in document order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    /// Required property names in declaration order.
    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub required: IndexSet<String>,
    /// Item schema for arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaNode>,
    /// Parts of an `allOf`, or alternatives of a `oneOf` / `anyOf`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub composed_of: Vec<SchemaNode>,
    /// Allowed literal values.
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    /// Literal example supplied by the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Literal default supplied by the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Set when the resolver substituted this schema.
    #[serde(rename = "x-placeholder", skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
}

impl Schema {
    /// Creates an empty schema of the given kind.
    pub fn of_kind(kind: SchemaKind) -> Self {
        Schema {
            kind,
            ..Default::default()
        }
    }

    /// Creates the placeholder substituted for `reference`.
    ///
    /// Cycles yield an opaque object, unknown pointers an unresolved node.
    pub fn placeholder(marker: Placeholder, reference: &str) -> Self {
        let (kind, description) = match marker {
            Placeholder::Cycle => (
                SchemaKind::Object,
                format!("Circular reference to {}", reference),
            ),
            Placeholder::Unresolved => (
                SchemaKind::Unresolved,
                format!("Unresolved reference {}", reference),
            ),
        };
        Schema {
            kind,
            description: Some(description),
            placeholder: Some(marker),
            ..Default::default()
        }
    }

    /// Adds a property.
    pub fn with_property(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.properties.insert(name.into(), node);
        self
    }

    /// Marks a property name as required.
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    /// Sets the format hint.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the item schema.
    pub fn with_items(mut self, items: SchemaNode) -> Self {
        self.items = Some(items);
        self
    }

    /// Appends a composition part.
    pub fn with_part(mut self, part: SchemaNode) -> Self {
        self.composed_of.push(part);
        self
    }

    /// True when the schema should synthesize as a mapping.
    pub fn is_object_like(&self) -> bool {
        matches!(self.kind, SchemaKind::Object | SchemaKind::Unresolved)
            || !self.properties.is_empty()
    }

    /// Copies the scalar attributes and rebuilds every child node through `f`.
    pub(crate) fn map_children(&self, mut f: impl FnMut(&SchemaNode) -> SchemaNode) -> Schema {
        Schema {
            kind: self.kind,
            description: self.description.clone(),
            format: self.format.clone(),
            properties: self
                .properties
                .iter()
                .map(|(name, node)| (name.clone(), f(node)))
                .collect(),
            required: self.required.clone(),
            items: self.items.as_ref().map(&mut f),
            composed_of: self.composed_of.iter().map(&mut f).collect(),
            enum_values: self.enum_values.clone(),
            example: self.example.clone(),
            default: self.default.clone(),
            placeholder: self.placeholder,
        }
    }
}

/// A schema position: either a pointer or an inline body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaNode {
    /// A pointer such as `#/components/schemas/User`.
    Reference {
        /// The raw pointer string.
        #[serde(rename = "$ref")]
        pointer: String,
    },
    /// An inline schema body.
    Inline(Box<Schema>),
}

impl SchemaNode {
    /// Creates a reference node.
    pub fn reference(pointer: impl Into<String>) -> Self {
        SchemaNode::Reference {
            pointer: pointer.into(),
        }
    }

    /// Wraps an inline schema.
    pub fn inline(schema: Schema) -> Self {
        SchemaNode::Inline(Box::new(schema))
    }

    /// Shorthand for an inline schema of a single kind.
    pub fn of_kind(kind: SchemaKind) -> Self {
        SchemaNode::inline(Schema::of_kind(kind))
    }

    /// Returns the inline body, if any.
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaNode::Inline(schema) => Some(schema),
            SchemaNode::Reference { .. } => None,
        }
    }

    /// Returns the pointer, if this is a reference.
    pub fn pointer(&self) -> Option<&str> {
        match self {
            SchemaNode::Reference { pointer } => Some(pointer),
            SchemaNode::Inline(_) => None,
        }
    }

    /// Returns the placeholder marker of an inline node.
    pub fn placeholder(&self) -> Option<Placeholder> {
        self.as_schema().and_then(|s| s.placeholder)
    }

    /// True when no pointer or `allOf` remains anywhere in the tree.
    pub fn is_resolved(&self) -> bool {
        let Some(schema) = self.as_schema() else {
            return false;
        };
        schema.kind != SchemaKind::AllOf
            && schema.properties.values().all(SchemaNode::is_resolved)
            && schema.items.as_ref().map_or(true, SchemaNode::is_resolved)
            && schema.composed_of.iter().all(SchemaNode::is_resolved)
    }
}

impl Default for SchemaNode {
    fn default() -> Self {
        SchemaNode::inline(Schema::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_from_type_name() {
        assert_eq!(SchemaKind::from_type_name("integer"), SchemaKind::Integer);
        assert_eq!(SchemaKind::from_type_name("object"), SchemaKind::Object);
        assert_eq!(SchemaKind::from_type_name("tuple"), SchemaKind::Unknown);
    }

    #[test]
    fn test_is_resolved() {
        let reference = SchemaNode::reference("#/components/schemas/User");
        assert!(!reference.is_resolved());

        let nested = SchemaNode::inline(
            Schema::of_kind(SchemaKind::Object).with_property("owner", reference),
        );
        assert!(!nested.is_resolved());

        let flat = SchemaNode::inline(
            Schema::of_kind(SchemaKind::Object)
                .with_property("id", SchemaNode::of_kind(SchemaKind::String)),
        );
        assert!(flat.is_resolved());
    }

    #[test]
    fn test_serialize_shape() {
        let node = SchemaNode::inline(
            Schema::of_kind(SchemaKind::Object)
                .with_property("id", SchemaNode::of_kind(SchemaKind::Integer))
                .with_property("owner", SchemaNode::reference("#/components/schemas/User"))
                .with_required("id"),
        );
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "owner": {"$ref": "#/components/schemas/User"}
                },
                "required": ["id"]
            })
        );
    }

    #[test]
    fn test_placeholder_serializes_marker() {
        let node = SchemaNode::inline(Schema::placeholder(
            Placeholder::Cycle,
            "#/components/schemas/Node",
        ));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["x-placeholder"], json!("cycle"));
        assert_eq!(value["type"], json!("object"));
        assert_eq!(node.placeholder(), Some(Placeholder::Cycle));
    }
}
