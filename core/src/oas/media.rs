#![deny(missing_docs)]

//! # Media Selection
//!
//! Picks the representative media type of a `content` map.
//! Preference order:
//! 1. `application/json`
//! 2. any `+json` structured suffix
//! 3. `multipart/form-data`
//! 4. `application/x-www-form-urlencoded`
//! 5. any `application/*`
//! 6. `*/*`
//! 7. whatever comes first

use serde_json::{Map, Value};

/// Returns the selected media type name and its media object.
pub fn select_media(content: &Map<String, Value>) -> Option<(&str, &Value)> {
    find(content, |m| m == "application/json")
        .or_else(|| find(content, |m| m.ends_with("+json")))
        .or_else(|| find(content, |m| m == "multipart/form-data"))
        .or_else(|| find(content, |m| m == "application/x-www-form-urlencoded"))
        .or_else(|| find(content, |m| m.starts_with("application/")))
        .or_else(|| find(content, |m| m == "*/*"))
        .or_else(|| content.iter().next())
        .map(|(k, v)| (k.as_str(), v))
}

fn find<'a>(
    content: &'a Map<String, Value>,
    pred: impl Fn(&str) -> bool,
) -> Option<(&'a String, &'a Value)> {
    content.iter().find(|(k, _)| pred(essence(k)))
}

/// Media type without parameters (`application/json; charset=utf-8` -> `application/json`).
fn essence(media_type: &str) -> &str {
    media_type.split(';').next().unwrap_or(media_type).trim()
}
