//! Build orchestration for Forge projects.
//!
//! The [`Orchestrator`] runs the semantic stage (an external producer that
//! writes `.forge/semantic/semantic.json`) followed by the native backends,
//! in a fixed order and aborting on the first failure. The [`inspect`]
//! module offers read-only views of the bundle.
//!
//! # Example
//!
//! ```ignore
//! use forge_build::{ForgeConfig, Orchestrator};
//!
//! let config = ForgeConfig::load(&workdir)?;
//! let report = Orchestrator::from_config(&workdir, &config)?.build(Some("android"))?;
//! ```

pub mod config;
pub mod error;
pub mod inspect;
pub mod orchestrator;
pub mod stage;
pub mod target;

pub use config::{BuildConfig, ForgeConfig, ProjectConfig};
pub use error::{BuildError, Result};
pub use inspect::{inspect, InspectTarget};
pub use orchestrator::{BuildReport, Orchestrator, StageOutcome};
pub use stage::{CommandProducer, NativeStage, SemanticProducer};
pub use target::{BuildPlan, Target};
