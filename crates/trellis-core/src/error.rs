//! Error types for the core model.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the core model.
///
/// Tree mutation never fails: an unknown target is a no-op. These errors
/// only surface at decoding boundaries.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Component type name not present in the catalog.
    #[error("Unknown component type: {0}")]
    UnknownComponentKind(String),

    /// Persisted state could not be decoded or encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
