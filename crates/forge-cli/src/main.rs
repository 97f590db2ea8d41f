//! # forge
//!
//! Builds Forge projects to native platforms and inspects their semantic
//! bundle.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use forge_build::{inspect, BuildError, ForgeConfig, InspectTarget, Orchestrator};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "forge=info,forge_build=info,forge_codegen=info,forge_core=info".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<BuildError>() {
                Some(build) => eprintln!("[forge] error[{}]: {}", build.code(), build),
                None => eprintln!("[forge] error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let workdir = cli.dir;
    tracing::debug!(workdir = %workdir.display(), command = ?cli.command, "running");

    match cli.command {
        Command::Init => {
            ForgeConfig::init(&workdir)?;
        }
        Command::Build { target } => {
            let config = ForgeConfig::load(&workdir)?;
            let report = Orchestrator::from_config(&workdir, &config)?.build(target.as_deref())?;
            for stage in &report.stages {
                if let Some(output) = &stage.output {
                    tracing::debug!(target_name = %stage.target, output = %output.display(), "stage output");
                }
            }
        }
        Command::Inspect { target } => {
            let target = InspectTarget::parse(target.as_deref())?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            inspect(&workdir, target, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}
