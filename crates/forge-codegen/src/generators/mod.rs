//! Backend generators for the supported native platforms.
//!
//! Each backend is data: a [`Dialect`] for the tree walk, an output subtree
//! under `.forge/native/`, and a manifest of template files.

mod compose;
mod native;
mod swiftui;
mod templates;

pub use compose::{ANDROID_FILES, COMPOSE};
pub use native::{write_project, NativeGenerator};
pub use swiftui::{IOS_FILES, MACOS_FILES, SWIFTUI, SWIFTUI_COMPACT};
pub use templates::{TemplateEngine, TemplateSource};

use crate::lower::Dialect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kotlin package and bundle identifier used when none is configured.
pub const DEFAULT_PACKAGE_ID: &str = "com.forge.app";

/// App name used when none is configured.
pub const DEFAULT_APP_NAME: &str = "forge-project";

/// Native platforms a bundle can be lowered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Android,
    Ios,
    MacOs,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Android, Backend::Ios, Backend::MacOs];

    pub fn name(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::MacOs => "macos",
        }
    }

    /// Target framework name.
    pub fn framework_name(self) -> &'static str {
        match self {
            Self::Android => "Jetpack Compose",
            Self::Ios => "SwiftUI (iOS)",
            Self::MacOs => "SwiftUI (macOS)",
        }
    }

    /// Token table used to lower the UI tree.
    pub fn dialect(self) -> &'static Dialect {
        match self {
            Self::Android => &COMPOSE,
            Self::Ios => &SWIFTUI_COMPACT,
            Self::MacOs => &SWIFTUI,
        }
    }

    /// Output subtree relative to `.forge/native`.
    pub fn output_subdir(self) -> &'static [&'static str] {
        match self {
            Self::Android => &["android"],
            Self::Ios => &["ios"],
            Self::MacOs => &["apple", "macos"],
        }
    }

    /// Directory of this backend's templates inside a template root.
    pub fn template_dir(self) -> &'static str {
        self.name()
    }

    /// Files this backend emits.
    pub fn files(self) -> &'static [TemplateFile] {
        match self {
            Self::Android => ANDROID_FILES,
            Self::Ios => IOS_FILES,
            Self::MacOs => MACOS_FILES,
        }
    }

    /// Absolute output directory for a working directory.
    pub fn output_dir(self, workdir: &Path) -> PathBuf {
        self.output_subdir()
            .iter()
            .fold(forge_core::paths::native_root(workdir), |dir, part| {
                dir.join(part)
            })
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a backend's template manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    /// Template file name inside the backend's template directory.
    pub template: &'static str,
    /// Output path relative to the backend's output directory. Rendered as a
    /// template, so it may reference `package_path`.
    pub output: &'static str,
    /// Copy the template unmodified instead of rendering it.
    pub verbatim: bool,
}

/// Policy for bundles with more than one root component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootSelection {
    /// Lower only the first root; extra roots are reported and ignored.
    #[default]
    First,
    /// Lower every root inside one vertical container.
    Stack,
}

/// Options for project generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    /// Project name, used for app labels.
    pub app_name: String,
    /// Package/bundle identifier.
    pub package_id: String,
    /// Multi-root policy.
    pub roots: RootSelection,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            package_id: DEFAULT_PACKAGE_ID.to_string(),
            roots: RootSelection::default(),
        }
    }
}

/// Generated project output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedProject {
    /// Generated files, in manifest order.
    pub files: Vec<GeneratedFile>,
}

impl GeneratedProject {
    /// Find a file by its relative path.
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == Path::new(path))
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File path relative to the backend's output directory.
    pub path: PathBuf,
    /// File content.
    pub content: String,
}
