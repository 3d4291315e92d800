#![deny(missing_docs)]

//! # Docgen CLI
//!
//! Command Line Interface for the API documentation engine.
//!
//! Supported Commands:
//! - `assemble`: Builds the resolved document model (JSON/YAML).
//! - `example`: Prints the synthesized example of one component schema.
//! - `reconcile`: Compares the document's endpoints with an external roster.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod assemble;
mod error;
mod example;
mod input;
mod reconcile;

#[derive(Parser, Debug)]
#[clap(author, version, about = "API documentation model builder")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Builds the full document model for an external renderer.
    Assemble(assemble::AssembleArgs),
    /// Prints a synthesized example for one component schema.
    Example(example::ExampleArgs),
    /// Reports endpoints present in only one of the document and a roster.
    Reconcile(reconcile::ReconcileArgs),
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docgen=info,docgen_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Assemble(args) => assemble::execute(args)?,
        Commands::Example(args) => example::execute(args)?,
        Commands::Reconcile(args) => reconcile::execute(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reconcile_flags() {
        let cli = Cli::try_parse_from([
            "docgen",
            "reconcile",
            "--spec",
            "api.yaml",
            "--roster",
            "endpoints.csv",
            "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Reconcile(args) => {
                assert!(args.strict);
                assert_eq!(args.roster, std::path::PathBuf::from("endpoints.csv"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
