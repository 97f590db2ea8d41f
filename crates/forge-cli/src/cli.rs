//! Command-line arguments parsed with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "forge")]
#[command(about = "Transpile Forge UI projects to native platforms")]
#[command(version)]
pub struct Cli {
    /// Project working directory
    #[arg(short = 'C', long = "dir", env = "FORGE_DIR", default_value = ".", global = true)]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create forge.config.json
    Init,

    /// Build project (web, android, ios, macos; web, android and ios when omitted)
    Build {
        /// Target to build
        target: Option<String>,
    },

    /// Inspect semantic bundle (ui, semantic)
    Inspect {
        /// What to print
        target: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_target() {
        let cli = Cli::try_parse_from(["forge", "build"]).unwrap();
        assert!(matches!(cli.command, Command::Build { target: None }));
    }

    #[test]
    fn test_global_dir_flag() {
        let cli = Cli::try_parse_from(["forge", "inspect", "ui", "-C", "demo"]).unwrap();
        assert_eq!(cli.dir, PathBuf::from("demo"));
        assert!(matches!(cli.command, Command::Inspect { target: Some(ref t) } if t == "ui"));
    }

    #[test]
    fn test_unknown_targets_reach_the_orchestrator() {
        let cli = Cli::try_parse_from(["forge", "build", "windows"]).unwrap();
        assert!(matches!(cli.command, Command::Build { target: Some(ref t) } if t == "windows"));
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["forge"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
