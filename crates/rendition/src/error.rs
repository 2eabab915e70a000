//! Error types for the Rendition library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Rendition operations.
#[derive(Debug, Error)]
pub enum RenditionError {
    /// The candidate generator was unreachable, rejected the request,
    /// or returned output that could not be read as candidates.
    #[error("Generation error: {0}")]
    Generation(String),

    /// A best-effort save of an accepted translation failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Input could not be interpreted as text.
    #[error("Invalid text: {0}")]
    InvalidText(String),

    /// No review item exists at the given position.
    #[error("Review item {index} not found (session has {len} items)")]
    ItemNotFound { index: usize, len: usize },

    /// An edit-only operation was attempted on an item that is not being edited.
    #[error("Review item {index} is not being edited")]
    NotEditing { index: usize },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RenditionError {
    /// Whether the user can reasonably retry the operation that failed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RenditionError::Generation(_) | RenditionError::Persistence(_)
        )
    }
}

/// Result type alias for Rendition operations.
pub type Result<T> = std::result::Result<T, RenditionError>;
