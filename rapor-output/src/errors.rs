//! Export error types

use thiserror::Error;

/// Errors raised while rendering or writing an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Filesystem error at {path} during {operation}: {error}")]
    Filesystem {
        path: String,
        operation: String,
        error: String,
    },

    #[error("File already exists: {path}")]
    FileExists { path: String },

    #[error("Serialization failed for {format}: {error}")]
    Serialization { format: String, error: String },
}
