//! Structured error types for the Vireo ecosystem.

use thiserror::Error;

/// Unified error type for all Vireo operations.
#[derive(Debug, Error)]
pub enum VireoError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (unknown phone name, malformed model data)
    #[error("parse error: {0}")]
    Parse(String),

    /// Mismatched vector/matrix dimensions at model construction
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A state label indexes outside the supplied class inventory
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A zero-length utterance was passed where frames are required
    #[error("empty sequence: {0}")]
    EmptySequence(String),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the Vireo ecosystem.
pub type Result<T> = std::result::Result<T, VireoError>;
