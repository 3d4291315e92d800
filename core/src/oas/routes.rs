#![deny(missing_docs)]

//! # Route Parsing
//!
//! Walks `paths` and turns every operation into an `EndpointDescriptor`.
//!
//! Structural problems with `paths` itself are fatal. Problems inside an
//! operation (a dangling parameter pointer, an unknown parameter location)
//! drop that one element with a warning.

use crate::error::{AppError, AppResult};
use crate::oas::components::{
    Components, PARAMETERS_SECTION, REQUEST_BODIES_SECTION, RESPONSES_SECTION,
};
use crate::oas::media::select_media;
use crate::oas::models::{
    EndpointDescriptor, HttpMethod, ParamSource, ParameterDescriptor, RequestBodyDescriptor,
    ResponseDescriptor, DEFAULT_TAG,
};
use crate::oas::normalization::schema_from_value;
use crate::schema::SchemaNode;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const PATH_ITEMS_SECTION: &str = "pathItems";

/// Parses every operation under `paths`.
///
/// `global_security` is the document-level `security` list, used when an
/// operation declares none of its own.
pub fn parse_endpoints(
    paths: Option<&Value>,
    components: Components<'_>,
    global_security: Option<&Value>,
) -> AppResult<Vec<EndpointDescriptor>> {
    let paths = match paths {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(AppError::MalformedDocument(
                "`paths` must be a mapping".to_string(),
            ))
        }
    };

    let global_requires_auth = has_requirements(global_security);
    let mut endpoints = Vec::new();

    for (path, item) in paths {
        if is_extension(path) {
            continue;
        }
        let Some(item) = components.follow(item, PATH_ITEMS_SECTION) else {
            continue;
        };
        let item = item.as_object().ok_or_else(|| {
            AppError::MalformedDocument(format!("Path item '{}' must be a mapping", path))
        })?;

        let shared_params = parse_parameters(item.get("parameters"), components);

        for method in HttpMethod::ALL {
            let Some(op) = item.get(method.path_item_key()) else {
                continue;
            };
            let op = op.as_object().ok_or_else(|| {
                AppError::MalformedDocument(format!(
                    "Operation {} {} must be a mapping",
                    method, path
                ))
            })?;
            endpoints.push(build_endpoint(
                method,
                path,
                op,
                &shared_params,
                components,
                global_requires_auth,
            ));
        }
    }

    Ok(endpoints)
}

fn build_endpoint(
    method: HttpMethod,
    path: &str,
    op: &Map<String, Value>,
    shared_params: &[ParameterDescriptor],
    components: Components<'_>,
    global_requires_auth: bool,
) -> EndpointDescriptor {
    let mut endpoint = EndpointDescriptor::new(method, path);

    let tags: Vec<String> = op
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if !tags.is_empty() {
        endpoint.tags = tags;
    } else {
        endpoint.tags = vec![DEFAULT_TAG.to_string()];
    }

    endpoint.summary = string_field(op, "summary");
    endpoint.description = string_field(op, "description");
    endpoint.operation_id = string_field(op, "operationId");
    endpoint.deprecated = op
        .get("deprecated")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    endpoint.requires_auth = match op.get("security") {
        Some(own) => has_requirements(Some(own)),
        None => global_requires_auth,
    };

    endpoint.parameters = merge_parameters(
        shared_params,
        parse_parameters(op.get("parameters"), components),
    );
    endpoint.request_body = op
        .get("requestBody")
        .and_then(|body| parse_request_body(body, components));
    endpoint.responses = parse_responses(op.get("responses"), components);

    endpoint
}

/// Operation parameters override path-level ones with the same name and location.
fn merge_parameters(
    shared: &[ParameterDescriptor],
    own: Vec<ParameterDescriptor>,
) -> Vec<ParameterDescriptor> {
    let mut merged = shared.to_vec();
    for param in own {
        match merged
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => merged.push(param),
        }
    }
    merged
}

fn parse_parameters(list: Option<&Value>, components: Components<'_>) -> Vec<ParameterDescriptor> {
    let Some(list) = list.and_then(Value::as_array) else {
        return Vec::new();
    };
    list.iter()
        .filter_map(|raw| components.follow(raw, PARAMETERS_SECTION))
        .filter_map(parse_parameter)
        .collect()
}

fn parse_parameter(raw: &Value) -> Option<ParameterDescriptor> {
    let name = raw.get("name").and_then(Value::as_str)?;
    let location = match raw.get("in").and_then(Value::as_str).map(str::parse::<ParamSource>) {
        Some(Ok(location)) => location,
        Some(Err(message)) => {
            tracing::warn!(parameter = name, "{}; parameter dropped", message);
            return None;
        }
        None => {
            tracing::warn!(parameter = name, "parameter without location dropped");
            return None;
        }
    };

    let schema = match raw.get("schema") {
        Some(schema) => schema_from_value(schema),
        None => raw
            .get("content")
            .and_then(Value::as_object)
            .and_then(select_media)
            .and_then(|(_, media)| media.get("schema"))
            .map(schema_from_value)
            .unwrap_or_default(),
    };

    let required = location == ParamSource::Path
        || raw.get("required").and_then(Value::as_bool).unwrap_or(false);

    Some(ParameterDescriptor {
        name: name.to_string(),
        location,
        required,
        description: raw
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        schema,
    })
}

fn parse_request_body(raw: &Value, components: Components<'_>) -> Option<RequestBodyDescriptor> {
    let body = components.follow(raw, REQUEST_BODIES_SECTION)?;
    let (media_type, media) = body
        .get("content")
        .and_then(Value::as_object)
        .and_then(select_media)?;

    Some(RequestBodyDescriptor {
        media_type: media_type.to_string(),
        required: body.get("required").and_then(Value::as_bool).unwrap_or(false),
        description: body
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        schema: media_schema(media).unwrap_or_default(),
    })
}

fn parse_responses(
    raw: Option<&Value>,
    components: Components<'_>,
) -> BTreeMap<String, ResponseDescriptor> {
    let Some(responses) = raw.and_then(Value::as_object) else {
        return BTreeMap::new();
    };

    let mut parsed = BTreeMap::new();
    for (status, response) in responses {
        if is_extension(status) {
            continue;
        }
        let Some(response) = components.follow(response, RESPONSES_SECTION) else {
            continue;
        };
        let selected = response
            .get("content")
            .and_then(Value::as_object)
            .and_then(select_media);

        parsed.insert(
            status.clone(),
            ResponseDescriptor {
                status: status.clone(),
                description: response
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                media_type: selected.map(|(media_type, _)| media_type.to_string()),
                schema: selected.and_then(|(_, media)| media_schema(media)),
            },
        );
    }
    parsed
}

fn media_schema(media: &Value) -> Option<SchemaNode> {
    media.get("schema").map(schema_from_value)
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// True when a `security` list holds at least one requirement.
fn has_requirements(security: Option<&Value>) -> bool {
    security
        .and_then(Value::as_array)
        .is_some_and(|list| !list.is_empty())
}

fn is_extension(key: &str) -> bool {
    key.starts_with("x-")
}
