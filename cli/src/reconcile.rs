#![deny(missing_docs)]

//! # Reconcile Command
//!
//! Cross-checks the document's endpoints against an independently
//! maintained roster and prints what each side is missing.

use crate::error::{CliError, CliResult};
use crate::input::{load_document, load_roster};
use docgen_core::{keys_of, reconcile, Reconciliation};
use std::path::PathBuf;

/// Arguments for the reconcile command.
#[derive(clap::Args, Debug, Clone)]
pub struct ReconcileArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, env = "DOCGEN_SPEC")]
    pub spec: PathBuf,

    /// Roster file: `METHOD /path` lines or `method,path,...` CSV.
    #[clap(long, env = "DOCGEN_ROSTER")]
    pub roster: PathBuf,

    /// Fail when the two sources disagree.
    #[clap(long)]
    pub strict: bool,
}

/// Executes the reconciliation.
pub fn execute(args: &ReconcileArgs) -> CliResult<()> {
    let report = run(args)?;
    println!("{}", report);

    let drift = report.only_in_a.len() + report.only_in_b.len();
    if args.strict && drift > 0 {
        return Err(CliError::Drift(drift));
    }
    Ok(())
}

fn run(args: &ReconcileArgs) -> CliResult<Reconciliation> {
    let doc = load_document(&args.spec)?;
    let roster = load_roster(&args.roster)?;
    Ok(reconcile(&keys_of(&doc.endpoints), &roster))
}
