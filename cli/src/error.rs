#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use docgen_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure reported by the core engine.
    #[display("{}", _0)]
    Core(AppError),

    /// `--strict` reconciliation found endpoints present on one side only.
    #[display("Inventory drift: {} endpoint(s) differ", _0)]
    #[from(ignore)]
    Drift(usize),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passthrough() {
        let err: CliError = AppError::MalformedDocument("paths".into()).into();
        assert_eq!(err.to_string(), "Malformed Document: paths");
    }

    #[test]
    fn test_drift_display() {
        assert_eq!(CliError::Drift(2).to_string(), "Inventory drift: 2 endpoint(s) differ");
    }
}
