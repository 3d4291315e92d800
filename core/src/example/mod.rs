#![deny(missing_docs)]

//! # Example Module
//!
//! - **synthesizer**: one deterministic valid example per schema.
//! - **mutator**: three invalid variants derived from that example.

pub mod mutator;
pub mod synthesizer;

pub use mutator::{mutate, mutate_example, InvalidVariant, MutationKind};
pub use synthesizer::{example_for, synthesize, ExampleValue};
