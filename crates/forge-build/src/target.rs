//! Build targets and plan resolution.

use crate::error::{BuildError, Result};
use forge_codegen::Backend;
use std::fmt;
use std::str::FromStr;

/// A stage the orchestrator can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Semantic stage: produces the bundle from project source.
    Web,
    Android,
    Ios,
    MacOs,
}

impl Target {
    pub const ALL: [Target; 4] = [Target::Web, Target::Android, Target::Ios, Target::MacOs];

    /// Stages run when no target is named. macOS is opt-in.
    pub const DEFAULT_SEQUENCE: [Target; 3] = [Target::Web, Target::Android, Target::Ios];

    pub fn name(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::MacOs => "macos",
        }
    }

    /// Native backend of this target, `None` for the semantic stage.
    pub fn backend(self) -> Option<Backend> {
        match self {
            Self::Web => None,
            Self::Android => Some(Backend::Android),
            Self::Ios => Some(Backend::Ios),
            Self::MacOs => Some(Backend::MacOs),
        }
    }
}

impl From<Backend> for Target {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Android => Self::Android,
            Backend::Ios => Self::Ios,
            Backend::MacOs => Self::MacOs,
        }
    }
}

impl FromStr for Target {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|target| target.name() == s)
            .ok_or_else(|| BuildError::UnknownTarget(s.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered stages of one build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    targets: Vec<Target>,
}

impl BuildPlan {
    /// Resolve the requested target before any stage runs.
    pub fn resolve(target: Option<&str>) -> Result<Self> {
        let targets = match target {
            None => Target::DEFAULT_SEQUENCE.to_vec(),
            Some(name) => vec![name.parse()?],
        };
        Ok(Self { targets })
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }
}
