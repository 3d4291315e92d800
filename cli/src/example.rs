#![deny(missing_docs)]

//! # Example Command
//!
//! Prints the synthesized example of one component schema, optionally with
//! its three invalid variants.

use crate::error::{CliError, CliResult};
use crate::input::load_document;
use docgen_core::{example_for, mutate_example, SchemaResolver};
use serde_json::json;
use std::path::PathBuf;

/// Arguments for the example command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExampleArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, env = "DOCGEN_SPEC")]
    pub spec: PathBuf,

    /// Name of the component schema.
    #[clap(long)]
    pub schema: String,

    /// Also print the three invalid variants.
    #[clap(long)]
    pub invalid: bool,
}

/// Executes the command, printing JSON to stdout.
pub fn execute(args: &ExampleArgs) -> CliResult<()> {
    println!("{}", render(args)?);
    Ok(())
}

fn render(args: &ExampleArgs) -> CliResult<String> {
    let doc = load_document(&args.spec)?;
    if doc.registry.get(&args.schema).is_none() {
        return Err(CliError::General(format!(
            "Schema '{}' not found in components",
            args.schema
        )));
    }

    let resolver = SchemaResolver::new(&doc.registry);
    let schema = resolver.resolve_named(&args.schema);
    let example = example_for(&schema);

    let output = if args.invalid {
        let invalid = mutate_example(schema.as_schema(), &example);
        json!({"valid": example, "invalid": invalid})
    } else {
        example
    };

    serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))
}
