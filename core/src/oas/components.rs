#![deny(missing_docs)]

//! # Component Lookup
//!
//! Follows `#/components/{section}/{name}` pointers for parameters, request
//! bodies and responses, and summarizes `securitySchemes`.

use crate::oas::models::SecuritySchemeInfo;
use crate::oas::ref_utils::extract_component_name;
use serde_json::Value;
use std::collections::HashSet;

/// Section holding reusable parameters.
pub const PARAMETERS_SECTION: &str = "parameters";
/// Section holding reusable request bodies.
pub const REQUEST_BODIES_SECTION: &str = "requestBodies";
/// Section holding reusable responses.
pub const RESPONSES_SECTION: &str = "responses";

/// Read-only view over the raw `components` object.
#[derive(Debug, Clone, Copy)]
pub struct Components<'a> {
    raw: Option<&'a Value>,
}

impl<'a> Components<'a> {
    /// Wraps the `components` value of a document (absent is fine).
    pub fn new(raw: Option<&'a Value>) -> Self {
        Components { raw }
    }

    /// Returns `value` itself, or the component object it points at.
    ///
    /// Chains of pointers are followed; a missing target or a pointer loop
    /// yields `None` and a warning.
    pub fn follow(&self, value: &'a Value, section: &str) -> Option<&'a Value> {
        let mut current = value;
        let mut visited = HashSet::new();
        while let Some(pointer) = current.get("$ref").and_then(Value::as_str) {
            if !visited.insert(pointer) {
                tracing::warn!(pointer, "pointer loop in components");
                return None;
            }
            let target = extract_component_name(pointer, section).and_then(|name| {
                self.raw
                    .and_then(|c| c.get(section))
                    .and_then(|s| s.get(name.as_str()))
            });
            match target {
                Some(next) => current = next,
                None => {
                    tracing::warn!(pointer, section, "component reference not found; dropped");
                    return None;
                }
            }
        }
        Some(current)
    }

    /// The `securitySchemes` summaries, in declaration order.
    pub fn security_schemes(&self) -> Vec<SecuritySchemeInfo> {
        let Some(schemes) = self
            .raw
            .and_then(|c| c.get("securitySchemes"))
            .and_then(Value::as_object)
        else {
            return Vec::new();
        };

        schemes
            .iter()
            .map(|(name, scheme)| SecuritySchemeInfo {
                name: name.clone(),
                kind: scheme
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                scheme: scheme
                    .get("scheme")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect()
    }
}
