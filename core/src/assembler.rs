#![deny(missing_docs)]

//! # Document Assembly
//!
//! Composes the catalog, the resolver, the synthesizer, the mutator and the
//! reconciler into one [`DocumentModel`]. Assembly performs no I/O and never
//! fails: schema-level problems surface as placeholders and notes.

use crate::catalog::EndpointCatalog;
use crate::example::{example_for, mutate_example, synthesize, ExampleValue, InvalidVariant};
use crate::inventory::{keys_of, reconcile, InventoryKey, Reconciliation};
use crate::oas::document::{ApiInfo, ParsedOpenApi, DEFAULT_BASE_URL};
use crate::oas::models::{
    EndpointDescriptor, HttpMethod, ParamSource, ParameterDescriptor, RequestBodyDescriptor,
    ResponseDescriptor, SecuritySchemeInfo, DEFAULT_TAG,
};
use crate::schema::{ResolutionNote, SchemaNode, SchemaRegistry, SchemaResolver};
use serde::Serialize;
use std::collections::BTreeSet;

/// Knobs for assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Tag used for endpoints whose tag list is empty.
    pub sentinel_tag: String,
    /// Base URL used when the document declares no servers.
    pub default_base_url: String,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        AssemblyOptions {
            sentinel_tag: DEFAULT_TAG.to_string(),
            default_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// The assembled, renderer-facing model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    /// Document metadata.
    pub info: ApiInfo,
    /// Base URL for example requests.
    pub base_url: String,
    /// Declared security schemes.
    pub security_schemes: Vec<SecuritySchemeInfo>,
    /// Tag sections in lexicographic order.
    pub tags: Vec<TagSection>,
    /// One entry per endpoint, ordered by key.
    pub endpoints: Vec<EndpointDoc>,
    /// Component schemas in registry order.
    pub schemas: Vec<SchemaDoc>,
    /// Drift between the document and the external roster.
    pub inventory: Reconciliation,
    /// Cycle guards and dangling pointers met while resolving.
    pub notes: Vec<ResolutionNote>,
}

impl DocumentModel {
    /// Looks up an endpoint by key.
    pub fn endpoint(&self, key: &InventoryKey) -> Option<&EndpointDoc> {
        self.endpoints
            .binary_search_by(|e| e.key().cmp(key))
            .ok()
            .map(|i| &self.endpoints[i])
    }

    /// Looks up a tag section.
    pub fn section(&self, tag: &str) -> Option<&TagSection> {
        self.tags.iter().find(|s| s.tag == tag)
    }
}

/// Endpoints listed under one tag, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagSection {
    /// Tag name.
    pub tag: String,
    /// Member endpoint keys.
    pub endpoints: Vec<InventoryKey>,
}

/// A fully resolved endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDoc {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template.
    pub path: String,
    /// Tags (sentinel applied).
    pub tags: Vec<String>,
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `operationId`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Deprecation flag.
    pub deprecated: bool,
    /// Whether a security requirement applies.
    pub requires_auth: bool,
    /// Parameters with examples.
    pub parameters: Vec<ParameterDoc>,
    /// Request payload with valid and invalid examples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<PayloadDoc>,
    /// Responses ordered by status code.
    pub responses: Vec<ResponseDoc>,
}

impl EndpointDoc {
    /// The endpoint's inventory key.
    pub fn key(&self) -> InventoryKey {
        InventoryKey::new(self.method.as_str(), &self.path)
    }
}

/// A resolved parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDoc {
    /// Name.
    pub name: String,
    /// Location.
    pub location: ParamSource,
    /// Required flag.
    pub required: bool,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolved schema.
    pub schema: SchemaNode,
    /// Synthesized value.
    pub example: ExampleValue,
}

/// A resolved request payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadDoc {
    /// Media type.
    pub media_type: String,
    /// Required flag.
    pub required: bool,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolved schema.
    pub schema: SchemaNode,
    /// Valid example.
    pub example: ExampleValue,
    /// Exactly three invalid variants.
    pub invalid_examples: [InvalidVariant; 3],
}

/// A resolved response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDoc {
    /// Status code key.
    pub status: String,
    /// Description (empty when absent).
    pub description: String,
    /// Media type, when the response has content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Resolved schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
    /// Example, when a schema is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ExampleValue>,
}

/// A resolved component schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDoc {
    /// Component name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolved schema.
    pub schema: SchemaNode,
    /// Synthesized value.
    pub example: ExampleValue,
}

/// Assembles a model from raw parts with default metadata.
pub fn assemble(
    endpoints: &[EndpointDescriptor],
    registry: &SchemaRegistry,
    external_inventory: &BTreeSet<InventoryKey>,
) -> DocumentModel {
    assemble_with(
        endpoints,
        registry,
        external_inventory,
        &AssemblyOptions::default(),
    )
}

/// Assembles a model from raw parts.
pub fn assemble_with(
    endpoints: &[EndpointDescriptor],
    registry: &SchemaRegistry,
    external_inventory: &BTreeSet<InventoryKey>,
    options: &AssemblyOptions,
) -> DocumentModel {
    let resolver = SchemaResolver::new(registry);
    let catalog = EndpointCatalog::group_with_sentinel(endpoints, &options.sentinel_tag);

    let tags = catalog
        .iter()
        .map(|(tag, members)| TagSection {
            tag: tag.to_string(),
            endpoints: members.iter().map(|e| e.key()).collect(),
        })
        .collect();

    let mut endpoint_docs: Vec<EndpointDoc> = endpoints
        .iter()
        .map(|endpoint| document_endpoint(endpoint, &resolver, &options.sentinel_tag))
        .collect();
    endpoint_docs.sort_by_key(EndpointDoc::key);

    let schemas = registry
        .names()
        .map(|name| {
            let schema = resolver.resolve_named(name);
            SchemaDoc {
                name: name.to_string(),
                description: schema.as_schema().and_then(|s| s.description.clone()),
                example: example_for(&schema),
                schema,
            }
        })
        .collect();

    let inventory = reconcile(&keys_of(endpoints), external_inventory);
    if !inventory.is_clean() {
        tracing::info!(
            only_in_spec = inventory.only_in_a.len(),
            only_in_roster = inventory.only_in_b.len(),
            "inventory drift detected"
        );
    }

    DocumentModel {
        info: ApiInfo::default(),
        base_url: options.default_base_url.trim_end_matches('/').to_string(),
        security_schemes: Vec::new(),
        tags,
        endpoints: endpoint_docs,
        schemas,
        inventory,
        notes: resolver.notes(),
    }
}

/// Assembles a parsed document. `external` defaults to an empty roster.
pub fn assemble_document(
    doc: &ParsedOpenApi,
    external: Option<&BTreeSet<InventoryKey>>,
    options: &AssemblyOptions,
) -> DocumentModel {
    let empty = BTreeSet::new();
    let mut model = assemble_with(
        &doc.endpoints,
        &doc.registry,
        external.unwrap_or(&empty),
        options,
    );
    model.info = doc.info.clone();
    model.base_url = doc.base_url_or(&options.default_base_url);
    model.security_schemes = doc.security_schemes.clone();
    model
}

fn document_endpoint(
    endpoint: &EndpointDescriptor,
    resolver: &SchemaResolver<'_>,
    sentinel_tag: &str,
) -> EndpointDoc {
    tracing::debug!(endpoint = %endpoint.key(), "assembling endpoint");

    let tags = if endpoint.tags.is_empty() {
        vec![sentinel_tag.to_string()]
    } else {
        endpoint.tags.clone()
    };

    EndpointDoc {
        method: endpoint.method,
        path: endpoint.path.clone(),
        tags,
        summary: endpoint.summary.clone(),
        description: endpoint.description.clone(),
        operation_id: endpoint.operation_id.clone(),
        deprecated: endpoint.deprecated,
        requires_auth: endpoint.requires_auth,
        parameters: endpoint
            .parameters
            .iter()
            .map(|p| document_parameter(p, resolver))
            .collect(),
        request: endpoint
            .request_body
            .as_ref()
            .map(|body| document_payload(body, resolver)),
        responses: endpoint
            .responses
            .values()
            .map(|r| document_response(r, resolver))
            .collect(),
    }
}

fn document_parameter(param: &ParameterDescriptor, resolver: &SchemaResolver<'_>) -> ParameterDoc {
    let schema = resolver.resolve(&param.schema);
    ParameterDoc {
        name: param.name.clone(),
        location: param.location,
        required: param.required,
        description: param.description.clone(),
        example: synthesize(&schema, &param.name, 0),
        schema,
    }
}

fn document_payload(body: &RequestBodyDescriptor, resolver: &SchemaResolver<'_>) -> PayloadDoc {
    let schema = resolver.resolve(&body.schema);
    let example = example_for(&schema);
    let invalid_examples = mutate_example(schema.as_schema(), &example);
    PayloadDoc {
        media_type: body.media_type.clone(),
        required: body.required,
        description: body.description.clone(),
        schema,
        example,
        invalid_examples,
    }
}

fn document_response(response: &ResponseDescriptor, resolver: &SchemaResolver<'_>) -> ResponseDoc {
    let schema = response.schema.as_ref().map(|s| resolver.resolve(s));
    ResponseDoc {
        status: response.status.clone(),
        description: response.description.clone(),
        media_type: response.media_type.clone(),
        example: schema.as_ref().map(example_for),
        schema,
    }
}
