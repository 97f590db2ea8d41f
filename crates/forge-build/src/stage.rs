//! Stage traits: the seams between the orchestrator and its collaborators.

use crate::error::{BuildError, Result};
use crate::target::Target;
use anyhow::{bail, Context};
use forge_codegen::NativeGenerator;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Produces the semantic bundle from project source.
///
/// Postcondition on success: `.forge/semantic/semantic.json` exists in the
/// working directory.
pub trait SemanticProducer {
    /// Run the semantic stage in `workdir`.
    fn produce(&self, workdir: &Path) -> anyhow::Result<()>;
}

/// Lowers the semantic bundle to one native project.
pub trait NativeStage {
    /// Target this stage serves.
    fn target(&self) -> Target;

    /// Generate the native project of `workdir`, returning its output directory.
    fn generate(&self, workdir: &Path) -> Result<PathBuf>;
}

impl NativeStage for NativeGenerator<'_> {
    fn target(&self) -> Target {
        self.backend().into()
    }

    fn generate(&self, workdir: &Path) -> Result<PathBuf> {
        NativeGenerator::generate(self, workdir)
            .map_err(|err| BuildError::from_codegen(self.backend().name(), err))
    }
}

/// Semantic producer backed by an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandProducer {
    program: String,
    args: Vec<String>,
}

impl CommandProducer {
    /// Build from a command line split into program and arguments.
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| BuildError::backend_failure("web", "semantic producer command is empty"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl SemanticProducer for CommandProducer {
    fn produce(&self, workdir: &Path) -> anyhow::Result<()> {
        tracing::debug!(program = %self.program, args = ?self.args, "running semantic producer");
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(workdir)
            .status()
            .with_context(|| format!("failed to run `{}`", self.program))?;

        if !status.success() {
            bail!("`{}` exited with {}", self.program, status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_codegen::Backend;

    #[test]
    fn test_empty_command_is_rejected() {
        let err = CommandProducer::new(&[]).unwrap_err();
        assert_eq!(err.code(), "BackendFailure");
    }

    #[test]
    fn test_missing_program_fails() {
        let dir = tempfile::tempdir().unwrap();
        let producer =
            CommandProducer::new(&["forge-test-no-such-program".to_string()]).unwrap();
        let err = producer.produce(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("forge-test-no-such-program"));
    }

    #[test]
    fn test_generator_stage_reports_missing_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let stage: Box<dyn NativeStage> = Box::new(NativeGenerator::new(Backend::Ios));
        assert_eq!(stage.target(), Target::Ios);

        let err = stage.generate(dir.path()).unwrap_err();
        assert!(matches!(err, BuildError::BundleNotFound(_)));
    }
}
