//! Native project generator shared by every backend.

use super::templates::{TemplateEngine, TemplateSource};
use super::{Backend, GeneratedFile, GeneratedProject, ProjectOptions, RootSelection};
use crate::error::{CodegenError, Result};
use crate::lower::{lower, lower_stack, SourceFragment};
use forge_core::{paths, SemanticBundle};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Values available to every template.
#[derive(Debug, Serialize)]
struct TemplateData<'a> {
    content: &'a str,
    app_name: &'a str,
    package_id: &'a str,
    package_path: String,
}

/// Lowers a semantic bundle into one backend's native project.
///
/// The generator is stateless: it reads the bundle, never writes it, and
/// overwrites its own output tree on every run.
pub struct NativeGenerator<'a> {
    backend: Backend,
    engine: TemplateEngine<'a>,
    templates: TemplateSource,
    options: ProjectOptions,
}

impl<'a> NativeGenerator<'a> {
    /// Create a generator with built-in templates and default options.
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            engine: TemplateEngine::new(),
            templates: TemplateSource::default(),
            options: ProjectOptions::default(),
        }
    }

    pub fn with_templates(mut self, templates: TemplateSource) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_options(mut self, options: ProjectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Select the root(s) of the bundle and lower them.
    pub fn lower_bundle(&self, bundle: &SemanticBundle) -> Result<SourceFragment> {
        let dialect = self.backend.dialect();
        tracing::debug!(
            dialect = dialect.name,
            roots = bundle.roots().len(),
            "lowering bundle"
        );
        match (self.options.roots, bundle.roots()) {
            (_, []) => Err(CodegenError::NoRootComponent),
            (RootSelection::First, [first, rest @ ..]) => {
                if !rest.is_empty() {
                    tracing::warn!(
                        backend = %self.backend,
                        ignored = rest.len(),
                        "bundle has several root components; lowering only the first"
                    );
                }
                Ok(lower(first, dialect))
            }
            (RootSelection::Stack, [only]) => Ok(lower(only, dialect)),
            (RootSelection::Stack, roots) => Ok(lower_stack(roots, dialect)),
        }
    }

    /// Build every file of the project in memory.
    ///
    /// All templates are resolved here, so a missing template is reported
    /// before anything is written.
    pub fn generate_project(&self, bundle: &SemanticBundle) -> Result<GeneratedProject> {
        for root in bundle.roots() {
            let unsupported = root.unsupported_kinds();
            if !unsupported.is_empty() {
                tracing::warn!(
                    backend = %self.backend,
                    kinds = ?unsupported,
                    "rendering unsupported node kinds as placeholders"
                );
            }
        }

        let content = self.lower_bundle(bundle)?;
        let data = TemplateData {
            content: content.as_str(),
            app_name: &self.options.app_name,
            package_id: &self.options.package_id,
            package_path: self.options.package_id.replace('.', "/"),
        };

        let mut files = Vec::new();
        for file in self.backend.files() {
            let source = self.templates.load(self.backend, file.template)?;
            let path = self.engine.render_string(file.output, &data)?;
            let content = if file.verbatim {
                source.into_owned()
            } else {
                self.engine.render_string(&source, &data)?
            };
            files.push(GeneratedFile {
                path: PathBuf::from(path),
                content,
            });
        }

        Ok(GeneratedProject { files })
    }

    /// Output directory of this backend for a working directory.
    pub fn output_dir(&self, workdir: &Path) -> PathBuf {
        self.backend.output_dir(workdir)
    }

    /// Load the bundle of `workdir`, lower it and write the native project.
    ///
    /// The backend's output subtree is replaced as a whole, so files of a
    /// previous run (e.g. under an old package path) do not survive. Fails
    /// with [`forge_core::BundleError::NotFound`] before touching the output
    /// tree when the bundle is absent.
    pub fn generate(&self, workdir: &Path) -> Result<PathBuf> {
        let bundle = SemanticBundle::load(&paths::semantic_bundle_path(workdir))?;
        let project = self.generate_project(&bundle)?;
        let out_dir = self.output_dir(workdir);
        if out_dir.exists() {
            tracing::debug!(out_dir = %out_dir.display(), "clearing previous output");
            fs::remove_dir_all(&out_dir).map_err(|source| CodegenError::Write {
                path: out_dir.clone(),
                source,
            })?;
        }
        write_project(&project, &out_dir)?;
        tracing::info!(
            backend = %self.backend,
            files = project.files.len(),
            out_dir = %out_dir.display(),
            "{} project generated",
            self.backend.framework_name()
        );
        Ok(out_dir)
    }
}

/// Write generated files below `out_dir`, replacing existing files.
pub fn write_project(project: &GeneratedProject, out_dir: &Path) -> Result<()> {
    for file in &project.files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| CodegenError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.content).map_err(|source| CodegenError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "wrote file");
    }
    Ok(())
}
