//! Build orchestrator.
//!
//! Runs the semantic stage and the native stages in a fixed order. Stages
//! run sequentially and the first failure aborts the build.

use crate::config::ForgeConfig;
use crate::error::{BuildError, Result};
use crate::stage::{CommandProducer, NativeStage, SemanticProducer};
use crate::target::{BuildPlan, Target};
use forge_codegen::{Backend, NativeGenerator};
use forge_core::paths;
use std::path::PathBuf;

/// A stage that completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub target: Target,
    /// Output directory of a native stage.
    pub output: Option<PathBuf>,
}

/// Result of a successful build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub stages: Vec<StageOutcome>,
}

impl BuildReport {
    /// Completed targets, in execution order.
    pub fn targets(&self) -> Vec<Target> {
        self.stages.iter().map(|stage| stage.target).collect()
    }
}

/// Sequences build stages over one working directory.
pub struct Orchestrator {
    workdir: PathBuf,
    producer: Box<dyn SemanticProducer>,
    native: Vec<Box<dyn NativeStage>>,
}

impl Orchestrator {
    /// Create an orchestrator with no native stages registered.
    pub fn new(workdir: impl Into<PathBuf>, producer: Box<dyn SemanticProducer>) -> Self {
        Self {
            workdir: workdir.into(),
            producer,
            native: Vec::new(),
        }
    }

    /// Register a native stage; a later stage for the same target wins.
    pub fn with_native(mut self, stage: Box<dyn NativeStage>) -> Self {
        let target = stage.target();
        self.native.retain(|existing| existing.target() != target);
        self.native.push(stage);
        self
    }

    /// Orchestrator with the configured producer and every built-in backend.
    pub fn from_config(workdir: impl Into<PathBuf>, config: &ForgeConfig) -> Result<Self> {
        let workdir = workdir.into();
        let producer = CommandProducer::new(&config.build.web_command)?;
        let templates = config.template_source(&workdir);
        let options = config.project_options();

        let orchestrator = Backend::ALL.into_iter().fold(
            Self::new(workdir, Box::new(producer)),
            |orchestrator, backend| {
                let generator = NativeGenerator::new(backend)
                    .with_templates(templates.clone())
                    .with_options(options.clone());
                orchestrator.with_native(Box::new(generator))
            },
        );
        Ok(orchestrator)
    }

    /// Build `target`, or the default sequence when `None`.
    ///
    /// The target is resolved before any stage runs.
    pub fn build(&self, target: Option<&str>) -> Result<BuildReport> {
        let plan = BuildPlan::resolve(target)?;
        let mut report = BuildReport::default();

        for &target in plan.targets() {
            let output = match target.backend() {
                None => {
                    self.run_semantic()?;
                    None
                }
                Some(_) => Some(self.run_native(target)?),
            };
            report.stages.push(StageOutcome { target, output });
        }

        Ok(report)
    }

    fn run_semantic(&self) -> Result<()> {
        tracing::info!("starting web semantic build");
        self.producer
            .produce(&self.workdir)
            .map_err(|err| BuildError::backend_failure(Target::Web.name(), format!("{err:#}")))?;

        if !paths::bundle_exists(&self.workdir) {
            return Err(BuildError::backend_failure(
                Target::Web.name(),
                format!(
                    "semantic producer did not write {}",
                    paths::semantic_bundle_path(&self.workdir).display()
                ),
            ));
        }
        tracing::info!("web semantic build completed");
        Ok(())
    }

    fn run_native(&self, target: Target) -> Result<PathBuf> {
        let stage = self
            .native
            .iter()
            .find(|stage| stage.target() == target)
            .ok_or_else(|| BuildError::backend_failure(target.name(), "no native stage registered"))?;

        if !paths::bundle_exists(&self.workdir) {
            return Err(BuildError::BundleNotFound(paths::semantic_bundle_path(
                &self.workdir,
            )));
        }

        tracing::info!("starting {target} native build");
        let output = stage.generate(&self.workdir)?;
        tracing::info!("{target} native build completed");
        Ok(output)
    }
}
