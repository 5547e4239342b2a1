//! Shared domain types for the screening pipeline.

pub mod types;

pub use types::*;
