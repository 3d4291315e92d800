//! # Schema Resolution
//!
//! Dereferences pointers against a [`SchemaRegistry`], flattens `allOf`
//! compositions into a single effective schema, and terminates on circular
//! references by substituting an opaque object.
//!
//! Resolution results are memoized per pointer for the lifetime of one
//! resolver. Results that depended on the cycle guard are not memoized since
//! their shape depends on the chain they were reached through.

use crate::schema::{Placeholder, Schema, SchemaKind, SchemaNode, SchemaRegistry};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;

/// Something the resolver had to work around while resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResolutionNote {
    /// A pointer re-entered its own resolution chain.
    CycleGuard {
        /// The pointer that closed the cycle.
        reference: String,
    },
    /// A pointer named a schema absent from the registry.
    UnresolvedReference {
        /// The dangling pointer.
        reference: String,
    },
}

/// The names currently being resolved, outermost first.
#[derive(Default)]
struct Chain {
    names: Vec<String>,
    guard_hits: usize,
}

/// Resolves schema nodes against one document's registry.
pub struct SchemaResolver<'r> {
    registry: &'r SchemaRegistry,
    memo: RefCell<HashMap<String, SchemaNode>>,
    notes: RefCell<Vec<ResolutionNote>>,
}

impl<'r> SchemaResolver<'r> {
    /// Creates a resolver with an empty memo.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        SchemaResolver {
            registry,
            memo: RefCell::new(HashMap::new()),
            notes: RefCell::new(Vec::new()),
        }
    }

    /// The registry pointers are resolved against.
    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Resolves a node into a pointer-free, `allOf`-free tree.
    ///
    /// Resolving an already resolved node returns an equal node.
    pub fn resolve(&self, node: &SchemaNode) -> SchemaNode {
        let mut chain = Chain::default();
        self.resolve_node(node, &mut chain)
    }

    /// Resolves a component schema by name.
    pub fn resolve_named(&self, name: &str) -> SchemaNode {
        self.resolve(&SchemaNode::reference(SchemaRegistry::pointer_for(name)))
    }

    /// Notes gathered so far, in order of first occurrence.
    pub fn notes(&self) -> Vec<ResolutionNote> {
        self.notes.borrow().clone()
    }

    fn resolve_node(&self, node: &SchemaNode, chain: &mut Chain) -> SchemaNode {
        match node {
            SchemaNode::Reference { pointer } => self.resolve_reference(pointer, chain),
            SchemaNode::Inline(schema) => self.resolve_schema(schema, chain),
        }
    }

    fn resolve_reference(&self, pointer: &str, chain: &mut Chain) -> SchemaNode {
        if let Some(hit) = self.memo.borrow().get(pointer) {
            return hit.clone();
        }

        let (name, target) = match self.registry.lookup(pointer) {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(reference = %pointer, "{}; substituting empty object", err);
                self.note(ResolutionNote::UnresolvedReference {
                    reference: pointer.to_string(),
                });
                return SchemaNode::inline(Schema::placeholder(Placeholder::Unresolved, pointer));
            }
        };

        if chain.names.iter().any(|seen| seen == name) {
            chain.guard_hits += 1;
            tracing::info!(reference = %pointer, "cycle guard triggered; substituting opaque object");
            self.note(ResolutionNote::CycleGuard {
                reference: pointer.to_string(),
            });
            return SchemaNode::inline(Schema::placeholder(Placeholder::Cycle, pointer));
        }

        let hits_before = chain.guard_hits;
        chain.names.push(name.to_string());
        let resolved = self.resolve_node(target, chain);
        chain.names.pop();

        if chain.guard_hits == hits_before {
            self.memo
                .borrow_mut()
                .insert(pointer.to_string(), resolved.clone());
        }
        resolved
    }

    fn resolve_schema(&self, schema: &Schema, chain: &mut Chain) -> SchemaNode {
        if schema.kind == SchemaKind::AllOf {
            return self.flatten_all_of(schema, chain);
        }
        SchemaNode::inline(schema.map_children(|child| self.resolve_node(child, chain)))
    }

    /// Merges the resolved parts in order; siblings of `allOf` merge last.
    fn flatten_all_of(&self, schema: &Schema, chain: &mut Chain) -> SchemaNode {
        let mut merged = Schema::default();
        let mut substituted = None;

        for part in &schema.composed_of {
            let resolved = self.resolve_node(part, chain);
            match resolved.as_schema() {
                // Already recorded as a note; contributes nothing concrete.
                Some(part) if part.placeholder.is_some() => {
                    substituted = substituted.or_else(|| Some(part.clone()));
                }
                Some(part) => merge_into(&mut merged, part),
                None => {}
            }
        }

        let mut own = schema.clone();
        own.kind = SchemaKind::Unknown;
        own.composed_of.clear();
        let own = own.map_children(|child| self.resolve_node(child, chain));
        merge_into(&mut merged, &own);

        if !merged.properties.is_empty() {
            merged.kind = SchemaKind::Object;
        }

        // Only a fully substituted composition keeps the placeholder marker.
        if let Some(mut placeholder) = substituted {
            if merged.kind == SchemaKind::Unknown {
                merge_into(&mut placeholder, &merged);
                return SchemaNode::inline(placeholder);
            }
        }
        SchemaNode::inline(merged)
    }

    fn note(&self, note: ResolutionNote) {
        let mut notes = self.notes.borrow_mut();
        if !notes.contains(&note) {
            notes.push(note);
        }
    }
}

/// Merges one resolved part into the accumulated schema. Later parts win.
fn merge_into(target: &mut Schema, part: &Schema) {
    match part.kind {
        SchemaKind::Unknown => {}
        SchemaKind::Unresolved if target.kind != SchemaKind::Unknown => {}
        kind => target.kind = kind,
    }

    for (name, node) in &part.properties {
        target.properties.insert(name.clone(), node.clone());
    }
    target.required.extend(part.required.iter().cloned());

    if part.description.is_some() {
        target.description = part.description.clone();
    }
    if part.format.is_some() {
        target.format = part.format.clone();
    }
    if !part.enum_values.is_empty() {
        target.enum_values = part.enum_values.clone();
    }
    if part.example.is_some() {
        target.example = part.example.clone();
    }
    if part.default.is_some() {
        target.default = part.default.clone();
    }
    if part.items.is_some() {
        target.items = part.items.clone();
    }
    if !part.composed_of.is_empty() {
        target.composed_of = part.composed_of.clone();
    }
}
