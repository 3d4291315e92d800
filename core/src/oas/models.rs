#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Intermediate Representation (IR) structures for parsed OpenAPI elements.
//!
//! These structs carry the endpoint list from the raw document into the
//! catalog, the resolver and the assembler.

use crate::inventory::InventoryKey;
use crate::schema::SchemaNode;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Tag assigned to operations that declare none.
pub const DEFAULT_TAG: &str = "default";

/// HTTP verbs recognized on a path item.
///
/// Declaration order is the conventional REST reading order and drives `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// All verbs in reading order.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Trace,
    ];

    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Lower-case key used in a path item.
    pub fn path_item_key(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown HTTP method '{}'", s))
    }
}

/// The source location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    /// Path.
    Path,
    /// Query.
    Query,
    /// Header.
    Header,
    /// Cookie.
    Cookie,
}

impl FromStr for ParamSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(ParamSource::Path),
            "query" => Ok(ParamSource::Query),
            "header" => Ok(ParamSource::Header),
            "cookie" => Ok(ParamSource::Cookie),
            other => Err(format!("Unknown parameter location '{}'", other)),
        }
    }
}

/// Represents a parameter in a route.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Parameter name in the source.
    pub name: String,
    /// Location.
    pub location: ParamSource,
    /// Whether the parameter is mandatory. Always true for path parameters.
    pub required: bool,
    /// Description from the document.
    pub description: Option<String>,
    /// Declared schema (may still contain pointers).
    pub schema: SchemaNode,
}

/// The request body of an operation, narrowed to its representative media type.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodyDescriptor {
    /// Selected media type (e.g. `application/json`).
    pub media_type: String,
    /// Whether the body is mandatory.
    pub required: bool,
    /// Description from the document.
    pub description: Option<String>,
    /// Declared schema (may still contain pointers).
    pub schema: SchemaNode,
}

/// One declared response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDescriptor {
    /// Status code or range key (`200`, `4XX`, `default`).
    pub status: String,
    /// Description; empty when the document gives none.
    pub description: String,
    /// Selected media type, when the response has content.
    pub media_type: Option<String>,
    /// Schema of the selected media type.
    pub schema: Option<SchemaNode>,
}

/// Represents a parsed API operation.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDescriptor {
    /// HTTP Method.
    pub method: HttpMethod,
    /// The URL path template (e.g. "/users/{id}").
    pub path: String,
    /// Tags in document order; `[DEFAULT_TAG]` when the operation declares none.
    pub tags: Vec<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// `operationId`, when given.
    pub operation_id: Option<String>,
    /// Whether this operation is deprecated.
    pub deprecated: bool,
    /// Whether a security requirement applies.
    pub requires_auth: bool,
    /// Path-level and operation-level parameters, merged.
    pub parameters: Vec<ParameterDescriptor>,
    /// Request body definition (if any).
    pub request_body: Option<RequestBodyDescriptor>,
    /// Responses keyed by status code.
    pub responses: BTreeMap<String, ResponseDescriptor>,
}

impl EndpointDescriptor {
    /// Creates a bare endpoint with the default tag and no parameters.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        EndpointDescriptor {
            method,
            path: path.into(),
            tags: vec![DEFAULT_TAG.to_string()],
            summary: None,
            description: None,
            operation_id: None,
            deprecated: false,
            requires_auth: false,
            parameters: Vec::new(),
            request_body: None,
            responses: BTreeMap::new(),
        }
    }

    /// Replaces the tag list.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The normalized `(METHOD, path)` key.
    pub fn key(&self) -> InventoryKey {
        InventoryKey::new(self.method.as_str(), &self.path)
    }
}

/// Summary of a `components.securitySchemes` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySchemeInfo {
    /// Name of the scheme in components.
    pub name: String,
    /// `type` (apiKey, http, oauth2, openIdConnect, mutualTLS).
    pub kind: String,
    /// `scheme` for http schemes (bearer, basic).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_priority_order() {
        let mut methods = vec![
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Get,
            HttpMethod::Patch,
            HttpMethod::Options,
            HttpMethod::Put,
            HttpMethod::Post,
        ];
        methods.sort();
        assert_eq!(
            methods,
            vec![
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Put,
                HttpMethod::Patch,
                HttpMethod::Delete,
                HttpMethod::Options,
                HttpMethod::Head,
            ]
        );
    }

    #[test]
    fn test_method_parse_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("fetch".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_endpoint_defaults() {
        let endpoint = EndpointDescriptor::new(HttpMethod::Get, "/health");
        assert_eq!(endpoint.tags, vec![DEFAULT_TAG]);
        assert_eq!(endpoint.key().to_string(), "GET /health");
    }

    #[test]
    fn test_param_source_parse() {
        assert_eq!("cookie".parse::<ParamSource>().unwrap(), ParamSource::Cookie);
        assert!("body".parse::<ParamSource>().is_err());
    }
}
