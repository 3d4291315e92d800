//! # Input Loading
//!
//! Reads the document and roster files handed to the subcommands.

use crate::error::{CliError, CliResult};
use docgen_core::{parse_openapi_document, parse_roster, InventoryKey, ParsedOpenApi};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Reads and parses an OpenAPI document (YAML or JSON).
pub fn load_document(path: &Path) -> CliResult<ParsedOpenApi> {
    let text = read(path, "document")?;
    let doc = parse_openapi_document(&text)?;
    tracing::info!(
        path = %path.display(),
        endpoints = doc.endpoints.len(),
        schemas = doc.registry.len(),
        "loaded document"
    );
    Ok(doc)
}

/// Reads and parses an endpoint roster.
pub fn load_roster(path: &Path) -> CliResult<BTreeSet<InventoryKey>> {
    let text = read(path, "roster")?;
    let keys = parse_roster(&text)?;
    tracing::info!(path = %path.display(), endpoints = keys.len(), "loaded roster");
    Ok(keys)
}

fn read(path: &Path, what: &str) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::General(format!(
            "{} file not found: {:?}",
            what, path
        )));
    }
    Ok(fs::read_to_string(path)?)
}
