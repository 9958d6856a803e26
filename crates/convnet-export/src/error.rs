//! Error types for graph export.

use thiserror::Error;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// I/O error while rendering or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The finished temp file could not be moved into place
    #[error("Failed to persist output: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// Output format could not be determined
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}
