//! Process-level error taxonomy for Forge builds.

use forge_codegen::CodegenError;
use forge_core::BundleError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that terminate a build or an inspection.
///
/// None of these are retried; the CLI reports each one with a
/// `[forge] error[<code>]` line and exits non-zero.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The semantic stage has not produced a bundle yet.
    #[error("semantic bundle not found at {}; run \"forge build web\" first", .0.display())]
    BundleNotFound(PathBuf),

    /// The bundle exists but its required structure is broken.
    #[error("invalid semantic bundle: {0}")]
    InvalidBundle(String),

    /// A backend template is absent from the installation.
    #[error("{target} template missing: {}", path.display())]
    TemplateMissing { target: String, path: PathBuf },

    #[error("unknown build target: {0} (available targets: web, android, ios, macos)")]
    UnknownTarget(String),

    #[error("Unknown inspect target: {0} (available targets: ui, semantic)")]
    UnknownInspectTarget(String),

    /// A stage failed for its own reasons.
    #[error("{stage} build failed: {message}")]
    BackendFailure { stage: String, message: String },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Stable identifier of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BundleNotFound(_) => "BundleNotFound",
            Self::InvalidBundle(_) => "InvalidBundle",
            Self::TemplateMissing { .. } => "TemplateMissing",
            Self::UnknownTarget(_) => "UnknownTarget",
            Self::UnknownInspectTarget(_) => "UnknownInspectTarget",
            Self::BackendFailure { .. } => "BackendFailure",
            Self::Config { .. } => "Config",
            Self::Io(_) => "Io",
        }
    }

    pub fn backend_failure(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackendFailure {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Classify a generator error raised while building `target`.
    pub fn from_codegen(target: &str, err: CodegenError) -> Self {
        match err {
            CodegenError::Bundle(err) => err.into(),
            CodegenError::NoRootComponent => Self::InvalidBundle(err.to_string()),
            CodegenError::TemplateMissing(path) => Self::TemplateMissing {
                target: target.to_string(),
                path,
            },
            other => Self::backend_failure(target, other.to_string()),
        }
    }
}

impl From<BundleError> for BuildError {
    fn from(err: BundleError) -> Self {
        match err {
            BundleError::NotFound(path) => Self::BundleNotFound(path),
            BundleError::Malformed(message) => Self::InvalidBundle(message),
            BundleError::Json(err) => Self::InvalidBundle(err.to_string()),
            BundleError::Io(err) => Self::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_not_found_hint() {
        let err: BuildError =
            BundleError::NotFound(PathBuf::from(".forge/semantic/semantic.json")).into();
        assert_eq!(err.code(), "BundleNotFound");
        assert!(err.to_string().contains("run \"forge build web\" first"));
    }

    #[test]
    fn test_codegen_classification() {
        let missing = CodegenError::TemplateMissing(PathBuf::from("ios/Info.plist.hbs"));
        let err = BuildError::from_codegen("ios", missing);
        assert_eq!(err.code(), "TemplateMissing");
        assert!(err.to_string().starts_with("ios template missing"));

        let err = BuildError::from_codegen("android", CodegenError::NoRootComponent);
        assert_eq!(err.code(), "InvalidBundle");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = BuildError::from_codegen(
            "android",
            CodegenError::Write {
                path: PathBuf::from("MainActivity.kt"),
                source: io,
            },
        );
        assert_eq!(err.code(), "BackendFailure");
        assert!(err.to_string().starts_with("android build failed"));
    }

    #[test]
    fn test_unknown_target_lists_options() {
        let err = BuildError::UnknownTarget("windows".to_string());
        assert_eq!(
            err.to_string(),
            "unknown build target: windows (available targets: web, android, ios, macos)"
        );
    }
}
