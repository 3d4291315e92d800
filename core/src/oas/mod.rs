#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! - **document**: Top-level entry point (metadata, servers, registry).
//! - **models**: Intermediate Representation definitions.
//! - **routes**: Parsing logic for API paths/endpoints.
//! - **components**: Reusable parameter/body/response lookup.
//! - **media**: Representative media type selection.
//! - **normalization**: Raw schema JSON to `SchemaNode`.
//! - **ref_utils**: Pointer helpers.

pub mod components;
pub mod document;
pub mod media;
pub mod models;
pub mod normalization;
pub mod ref_utils;
pub mod routes;

pub use document::{
    parse_openapi_document, parse_openapi_value, ApiInfo, ParsedOpenApi, DEFAULT_BASE_URL,
};
pub use models::{
    EndpointDescriptor, HttpMethod, ParamSource, ParameterDescriptor, RequestBodyDescriptor,
    ResponseDescriptor, SecuritySchemeInfo, DEFAULT_TAG,
};
pub use normalization::schema_from_value;
