//! Project configuration, `forge.config.json`.

use crate::error::{BuildError, Result};
use forge_codegen::generators::{DEFAULT_APP_NAME, DEFAULT_PACKAGE_ID};
use forge_codegen::{ProjectOptions, RootSelection, TemplateSource};
use forge_core::paths;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config version written by `forge init`.
pub const CONFIG_VERSION: &str = "0.1.0";

/// Default external semantic producer.
pub const DEFAULT_WEB_COMMAND: &str = "forge-web-builder";

/// Dotted identifier with at least two segments, e.g. `com.forge.app`.
const PACKAGE_ID_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$";

/// Contents of `forge.config.json`. Every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub version: String,
    pub project: ProjectConfig,
    #[serde(skip_serializing_if = "BuildConfig::is_default")]
    pub build: BuildConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    /// Kotlin package and bundle identifier; `com.forge.app` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Program and arguments of the semantic producer.
    pub web_command: Vec<String>,
    /// On-disk template tree; built-in templates when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
    pub roots: RootSelection,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            project: ProjectConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            package_id: None,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            web_command: vec![DEFAULT_WEB_COMMAND.to_string()],
            templates_dir: None,
            roots: RootSelection::default(),
        }
    }
}

impl BuildConfig {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl ForgeConfig {
    /// Load the config of `workdir`. A missing file yields the defaults.
    pub fn load(workdir: &Path) -> Result<Self> {
        let path = paths::config_path(workdir);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&text).map_err(|err| BuildError::Config {
            path: path.clone(),
            message: err.to_string(),
        })?;
        config.validate(&path)?;
        Ok(config)
    }

    /// Write the minimal config to `workdir`, replacing any existing one.
    pub fn init(workdir: &Path) -> Result<PathBuf> {
        let path = paths::config_path(workdir);
        let text = serde_json::to_string_pretty(&Self::default()).map_err(|err| {
            BuildError::Config {
                path: path.clone(),
                message: err.to_string(),
            }
        })?;
        fs::write(&path, text)?;
        tracing::info!("Created {}", paths::CONFIG_FILE);
        Ok(path)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |message: String| BuildError::Config {
            path: path.to_path_buf(),
            message,
        };

        let pattern = Regex::new(PACKAGE_ID_PATTERN).map_err(|err| invalid(err.to_string()))?;
        let package_id = self.package_id();
        if !pattern.is_match(package_id) {
            return Err(invalid(format!(
                "project.package_id `{package_id}` is not a dotted identifier"
            )));
        }

        let name = &self.project.name;
        if name.trim().is_empty() || name.chars().any(char::is_control) {
            return Err(invalid(format!(
                "project.name {name:?} must be non-empty text without control characters"
            )));
        }

        if self.build.web_command.is_empty() {
            return Err(invalid("build.web_command is empty".to_string()));
        }
        Ok(())
    }

    pub fn package_id(&self) -> &str {
        self.project.package_id.as_deref().unwrap_or(DEFAULT_PACKAGE_ID)
    }

    /// Generator options derived from the project section.
    pub fn project_options(&self) -> ProjectOptions {
        ProjectOptions {
            app_name: self.project.name.clone(),
            package_id: self.package_id().to_string(),
            roots: self.build.roots,
        }
    }

    /// Template source; a relative directory is resolved against `workdir`.
    pub fn template_source(&self, workdir: &Path) -> TemplateSource {
        match &self.build.templates_dir {
            Some(dir) => TemplateSource::Directory(workdir.join(dir)),
            None => TemplateSource::Builtin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ForgeConfig::load(dir.path()).unwrap();
        assert_eq!(config, ForgeConfig::default());
        assert_eq!(config.package_id(), "com.forge.app");
        assert_eq!(config.build.web_command, vec!["forge-web-builder"]);
    }

    #[test]
    fn test_init_writes_minimal_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = ForgeConfig::init(dir.path()).unwrap();

        let text = fs::read_to_string(path).unwrap();
        assert_eq!(
            text,
            "{\n  \"version\": \"0.1.0\",\n  \"project\": {\n    \"name\": \"forge-project\"\n  }\n}"
        );
        assert_eq!(ForgeConfig::load(dir.path()).unwrap(), ForgeConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            paths::config_path(dir.path()),
            r#"{"project":{"name":"Demo","package_id":"io.example.demo"},"build":{"roots":"stack","templates_dir":"tpl"}}"#,
        )
        .unwrap();

        let config = ForgeConfig::load(dir.path()).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        let options = config.project_options();
        assert_eq!(options.app_name, "Demo");
        assert_eq!(options.package_id, "io.example.demo");
        assert_eq!(options.roots, RootSelection::Stack);
        assert_eq!(
            config.template_source(dir.path()),
            TemplateSource::Directory(dir.path().join("tpl"))
        );
        assert_eq!(config.build.web_command, vec![DEFAULT_WEB_COMMAND]);
    }

    #[test]
    fn test_rejects_bad_package_id() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            paths::config_path(dir.path()),
            r#"{"project":{"package_id":"not a package"}}"#,
        )
        .unwrap();

        let err = ForgeConfig::load(dir.path()).unwrap_err();
        assert_eq!(err.code(), "Config");
        assert!(err.to_string().contains("package_id"));
    }

    #[test]
    fn test_project_name_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = paths::config_path(dir.path());

        for name in [r#""""#, r#""Demo\u0000""#, r#""Two\nLines""#] {
            fs::write(&path, format!(r#"{{"project":{{"name":{name}}}}}"#)).unwrap();
            let err = ForgeConfig::load(dir.path()).unwrap_err();
            assert_eq!(err.code(), "Config");
            assert!(err.to_string().contains("project.name"));
        }

        fs::write(&path, r#"{"project":{"name":"Tom & \"Jerry\" <x>"}}"#).unwrap();
        let config = ForgeConfig::load(dir.path()).unwrap();
        assert_eq!(config.project_options().app_name, "Tom & \"Jerry\" <x>");
    }

    #[test]
    fn test_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(paths::config_path(dir.path()), "{ version: ").unwrap();
        assert!(matches!(
            ForgeConfig::load(dir.path()),
            Err(BuildError::Config { .. })
        ));
    }
}
