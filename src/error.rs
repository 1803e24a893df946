//! Error types for boss data loading.

use thiserror::Error;

/// Errors that can occur when loading boss varieties or game settings.
#[derive(Debug, Error)]
pub enum BossDataError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A variety was registered without any part kinds.
    #[error("Boss variety '{name}' has no part kinds")]
    EmptyKinds { name: String },

    /// Parts must start with at least one hit point.
    #[error("Boss variety '{name}' has health_per_part {health}, expected at least 1")]
    InvalidHealth { name: String, health: i32 },

    /// Two varieties share a name.
    #[error("Boss variety '{name}' is registered twice")]
    DuplicateVariety { name: String },

    /// The designated fallback variety is not in the catalog.
    #[error("Default boss variety '{name}' is not registered")]
    MissingDefault { name: String },
}
