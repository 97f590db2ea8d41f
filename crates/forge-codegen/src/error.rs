//! Error types for code generation.

use forge_core::BundleError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The semantic bundle is missing or structurally invalid.
    #[error(transparent)]
    Bundle(#[from] BundleError),

    /// The bundle holds no root component to lower.
    #[error("semantic bundle has no root component in `ui.components`")]
    NoRootComponent,

    /// A required template file is absent.
    #[error("template missing: {}", .0.display())]
    TemplateMissing(PathBuf),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Writing generated output failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
