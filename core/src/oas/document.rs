#![deny(missing_docs)]

//! # OpenAPI Document Parsing
//!
//! Entry point that turns document text (YAML or JSON) into the pieces the
//! engine works on: metadata, the schema registry, the endpoint list and
//! the security scheme summaries.

use crate::error::{AppError, AppResult};
use crate::oas::components::Components;
use crate::oas::models::{EndpointDescriptor, SecuritySchemeInfo};
use crate::oas::routes::parse_endpoints;
use crate::schema::SchemaRegistry;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Base URL used when the document declares no servers.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Title used when `info.title` is absent.
pub const DEFAULT_TITLE: &str = "API Guide";
/// Version used when `info.version` is absent.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    /// API title.
    pub title: String,
    /// API version string.
    pub version: String,
    /// Long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for ApiInfo {
    fn default() -> Self {
        ApiInfo {
            title: DEFAULT_TITLE.to_string(),
            version: DEFAULT_VERSION.to_string(),
            description: None,
        }
    }
}

/// A parsed document, immutable once built.
#[derive(Debug, Clone)]
pub struct ParsedOpenApi {
    /// Metadata from `info`.
    pub info: ApiInfo,
    /// Server URLs in declaration order.
    pub servers: Vec<String>,
    /// Component schemas.
    pub registry: SchemaRegistry,
    /// Every operation, in document order.
    pub endpoints: Vec<EndpointDescriptor>,
    /// Summaries of `components.securitySchemes`.
    pub security_schemes: Vec<SecuritySchemeInfo>,
}

impl ParsedOpenApi {
    /// The base URL example requests are built against.
    ///
    /// First server, trailing slash trimmed. Relative server URLs are joined
    /// onto [`DEFAULT_BASE_URL`].
    pub fn base_url(&self) -> String {
        self.base_url_or(DEFAULT_BASE_URL)
    }

    /// Same as [`ParsedOpenApi::base_url`] with a caller-chosen fallback.
    pub fn base_url_or(&self, fallback: &str) -> String {
        let Some(first) = self.servers.first() else {
            return fallback.trim_end_matches('/').to_string();
        };
        if Url::parse(first).is_ok() {
            return first.trim_end_matches('/').to_string();
        }
        match Url::parse(fallback).and_then(|base| base.join(first)) {
            Ok(joined) => joined.as_str().trim_end_matches('/').to_string(),
            Err(_) => first.trim_end_matches('/').to_string(),
        }
    }
}

/// Parses document text. JSON is accepted as a YAML subset.
pub fn parse_openapi_document(text: &str) -> AppResult<ParsedOpenApi> {
    let value: Value = serde_yaml::from_str(text).map_err(|e| {
        AppError::MalformedDocument(format!("Failed to parse OpenAPI document: {}", e))
    })?;
    parse_openapi_value(&value)
}

/// Parses an already decoded document.
pub fn parse_openapi_value(value: &Value) -> AppResult<ParsedOpenApi> {
    let root = value.as_object().ok_or_else(|| {
        AppError::MalformedDocument("Document root must be a mapping".to_string())
    })?;

    let components = Components::new(root.get("components"));
    let registry = SchemaRegistry::from_components(root.get("components"))?;
    let endpoints = parse_endpoints(root.get("paths"), components, root.get("security"))?;

    tracing::debug!(
        endpoints = endpoints.len(),
        schemas = registry.len(),
        "parsed document"
    );

    Ok(ParsedOpenApi {
        info: parse_info(root.get("info")),
        servers: parse_servers(root.get("servers")),
        registry,
        endpoints,
        security_schemes: components.security_schemes(),
    })
}

fn parse_info(raw: Option<&Value>) -> ApiInfo {
    let text = |key: &str| {
        raw.and_then(|info| info.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let defaults = ApiInfo::default();
    ApiInfo {
        title: text("title").unwrap_or(defaults.title),
        version: text("version").unwrap_or(defaults.version),
        description: text("description"),
    }
}

fn parse_servers(raw: Option<&Value>) -> Vec<String> {
    raw.and_then(Value::as_array)
        .map(|servers| {
            servers
                .iter()
                .filter_map(|s| s.get("url").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_document() {
        let yaml = r#"
openapi: 3.0.0
info:
  title: Arcade
  version: 1.2.0
servers:
  - url: https://api.example.com/v1/
paths:
  /health:
    get:
      responses:
        '200':
          description: ok
components:
  schemas:
    Score:
      type: object
  securitySchemes:
    bearerAuth:
      type: http
      scheme: bearer
"#;
        let doc = parse_openapi_document(yaml).unwrap();
        assert_eq!(doc.info.title, "Arcade");
        assert_eq!(doc.info.version, "1.2.0");
        assert_eq!(doc.base_url(), "https://api.example.com/v1");
        assert_eq!(doc.endpoints.len(), 1);
        assert!(doc.registry.get("Score").is_some());
        assert_eq!(doc.security_schemes[0].name, "bearerAuth");
    }

    #[test]
    fn test_defaults() {
        let doc = parse_openapi_document("{}").unwrap();
        assert_eq!(doc.info, ApiInfo::default());
        assert_eq!(doc.base_url(), DEFAULT_BASE_URL);
        assert!(doc.endpoints.is_empty());
        assert!(doc.registry.is_empty());
    }

    #[test]
    fn test_relative_server_joined() {
        let doc = parse_openapi_document("servers:\n  - url: /api/\n").unwrap();
        assert_eq!(doc.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(
            parse_openapi_document("- a\n- b\n"),
            Err(AppError::MalformedDocument(_))
        ));
        assert!(matches!(
            parse_openapi_document("paths: [1, 2]"),
            Err(AppError::MalformedDocument(_))
        ));
        assert!(matches!(
            parse_openapi_document("components:\n  schemas: 3\n"),
            Err(AppError::MalformedDocument(_))
        ));
        assert!(matches!(
            parse_openapi_document("paths: {\n"),
            Err(AppError::MalformedDocument(_))
        ));
    }
}
