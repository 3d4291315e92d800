#![deny(missing_docs)]

//! # Docgen Core
//!
//! Schema resolution and example-synthesis engine for API documentation.
//!
//! A parsed OpenAPI document flows through the resolver, the synthesizer and
//! the mutator, is grouped by the catalog, cross-checked by the inventory
//! reconciler, and ends up in one serializable [`DocumentModel`].

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) parsing utilities.
pub mod oas;

/// Schema representation, registry and resolution.
pub mod schema;

/// Example synthesis and invalid payload mutation.
pub mod example;

/// Tag grouping.
pub mod catalog;

/// Endpoint inventory reconciliation.
pub mod inventory;

/// Document model assembly.
pub mod assembler;

pub use assembler::{
    assemble, assemble_document, assemble_with, AssemblyOptions, DocumentModel, EndpointDoc,
    ParameterDoc, PayloadDoc, ResponseDoc, SchemaDoc, TagSection,
};
pub use catalog::EndpointCatalog;
pub use error::{AppError, AppResult};
pub use example::{
    example_for, mutate, mutate_example, synthesize, ExampleValue, InvalidVariant, MutationKind,
};
pub use inventory::{keys_of, parse_roster, reconcile, InventoryKey, Reconciliation};
pub use oas::{
    parse_openapi_document, parse_openapi_value, schema_from_value, ApiInfo, EndpointDescriptor,
    HttpMethod, ParamSource, ParameterDescriptor, ParsedOpenApi, RequestBodyDescriptor,
    ResponseDescriptor, SecuritySchemeInfo, DEFAULT_BASE_URL, DEFAULT_TAG,
};
pub use schema::{
    Placeholder, ResolutionNote, Schema, SchemaKind, SchemaNode, SchemaRegistry, SchemaResolver,
};
