//! # Reference Utilities
//!
//! Shared helpers for turning `$ref` pointers into component names and back.
//!
//! These utilities never fetch external documents: only pointers local to the
//! current document (`#/components/...`) are understood.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when a component name is embedded into a pointer.
const POINTER_SEGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'%').add(b'#');

/// Extracts a component name from a `$ref` if it points to `#/components/{section}/{name}`.
///
/// Returns `None` for external references and other sections.
pub fn extract_component_name(ref_str: &str, section: &str) -> Option<String> {
    let pointer = ref_str.strip_prefix("#/")?;
    let segments: Vec<&str> = pointer.split('/').collect();

    if segments.len() != 3 {
        return None;
    }
    if segments[0] != "components" || segments[1] != section {
        return None;
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Builds the local pointer for a component, escaping the name as needed.
pub fn component_pointer(section: &str, name: &str) -> String {
    let escaped = name.replace('~', "~0").replace('/', "~1");
    format!(
        "#/components/{}/{}",
        section,
        utf8_percent_encode(&escaped, POINTER_SEGMENT)
    )
}

/// Decodes a JSON Pointer segment taken from a URI fragment.
///
/// Percent-decoding happens first, then `~1` and `~0` are unescaped.
pub fn decode_pointer_segment(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8_lossy()
        .replace("~1", "/")
        .replace("~0", "~")
}
