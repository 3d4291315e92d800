#![deny(missing_docs)]

//! # Assemble Command
//!
//! Builds the full document model and hands it to an external renderer as
//! JSON or YAML.

use crate::error::{CliError, CliResult};
use crate::input::{load_document, load_roster};
use docgen_core::{assemble_document, AssemblyOptions, DocumentModel, DEFAULT_BASE_URL};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the assemble command.
#[derive(clap::Args, Debug, Clone)]
pub struct AssembleArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, env = "DOCGEN_SPEC")]
    pub spec: PathBuf,

    /// Optional endpoint roster to reconcile against.
    #[clap(long, env = "DOCGEN_ROSTER")]
    pub roster: Option<PathBuf>,

    /// Output path for the model.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long, env = "DOCGEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Base URL used when the document declares no servers.
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Executes the assembly.
pub fn execute(args: &AssembleArgs) -> CliResult<()> {
    let model = build_model(args)?;
    let rendered = serialize(&model, args.output.as_deref())?;

    if let Some(out_path) = &args.output {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(out_path, rendered)?;
        tracing::info!(path = %out_path.display(), "document model written");
    } else {
        println!("{}", rendered);
    }

    if !model.inventory.is_clean() {
        tracing::warn!("{}", model.inventory);
    }
    Ok(())
}

fn build_model(args: &AssembleArgs) -> CliResult<DocumentModel> {
    let doc = load_document(&args.spec)?;
    let roster = args.roster.as_deref().map(load_roster).transpose()?;
    let options = AssemblyOptions {
        default_base_url: args.base_url.clone(),
        ..AssemblyOptions::default()
    };
    Ok(assemble_document(&doc, roster.as_ref(), &options))
}

/// YAML for `.yaml`/`.yml` outputs, pretty JSON otherwise.
fn serialize(model: &DocumentModel, output: Option<&Path>) -> CliResult<String> {
    let ext = output
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .unwrap_or("json");
    match ext {
        "yaml" | "yml" => serde_yaml::to_string(model)
            .map_err(|e| CliError::General(format!("YAML serialization failed: {}", e))),
        _ => serde_json::to_string_pretty(model)
            .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e))),
    }
}
