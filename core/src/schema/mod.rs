#![deny(missing_docs)]

//! # Schema Module
//!
//! - **node**: the tagged-variant schema representation.
//! - **registry**: the per-document registry of component schemas.
//! - **resolver**: pointer dereferencing, `allOf` flattening and cycle safety.

pub mod node;
pub mod registry;
pub mod resolver;

pub use node::{Placeholder, Schema, SchemaKind, SchemaNode};
pub use registry::SchemaRegistry;
pub use resolver::{ResolutionNote, SchemaResolver};
