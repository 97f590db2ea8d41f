//! Error types for semantic bundle access.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for bundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;

/// Errors that can occur while reading a semantic bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The bundle file does not exist; the semantic stage has not run.
    #[error("semantic bundle not found at {}", .0.display())]
    NotFound(PathBuf),

    /// The bundle exists but its required structure is broken.
    #[error("malformed semantic bundle: {0}")]
    Malformed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BundleError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
