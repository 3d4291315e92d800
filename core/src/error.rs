//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input document lacks the minimal OpenAPI shape. Fatal for the load.
    #[from(ignore)]
    #[display("Malformed Document: {_0}")]
    MalformedDocument(String),

    /// A pointer names a schema absent from the registry.
    ///
    /// Recovered by the resolver, which substitutes a placeholder node.
    #[from(ignore)]
    #[display("Unresolved Reference: {_0}")]
    UnresolvedReference(String),

    /// An externally supplied endpoint roster could not be parsed.
    #[from(ignore)]
    #[display("Invalid Roster (line {line}): {message}")]
    InvalidRoster {
        /// 1-based line number in the roster text.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
