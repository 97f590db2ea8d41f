//! Read-only views of the semantic bundle.

use crate::error::{BuildError, Result};
use forge_core::{paths, read_raw, SemanticBundle, UiNode};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// What to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectTarget {
    /// The UI tree, one node per line.
    Ui,
    /// The whole bundle as pretty JSON.
    Semantic,
}

impl InspectTarget {
    /// Parse a CLI argument; a missing argument is reported as `(none)`.
    pub fn parse(target: Option<&str>) -> Result<Self> {
        match target {
            Some("ui") => Ok(Self::Ui),
            Some("semantic") => Ok(Self::Semantic),
            Some(other) => Err(BuildError::UnknownInspectTarget(other.to_string())),
            None => Err(BuildError::UnknownInspectTarget("(none)".to_string())),
        }
    }
}

impl fmt::Display for InspectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ui => "ui",
            Self::Semantic => "semantic",
        })
    }
}

/// Print the bundle of `workdir` to `out`. The bundle file is only read.
pub fn inspect(workdir: &Path, target: InspectTarget, out: &mut dyn Write) -> Result<()> {
    let path = paths::semantic_bundle_path(workdir);
    match target {
        InspectTarget::Ui => {
            let bundle = SemanticBundle::load(&path)?;
            writeln!(out, "UI Tree:\n")?;
            write_tree(out, bundle.roots(), 0)?;
        }
        InspectTarget::Semantic => {
            let value = read_raw(&path)?;
            let pretty = serde_json::to_string_pretty(&value)
                .map_err(|err| BuildError::InvalidBundle(err.to_string()))?;
            writeln!(out, "Semantic Bundle:\n")?;
            writeln!(out, "{pretty}")?;
        }
    }
    Ok(())
}

fn write_tree(out: &mut dyn Write, nodes: &[UiNode], depth: usize) -> Result<()> {
    for node in nodes {
        let indent = "  ".repeat(depth);
        if node.props.is_empty() {
            writeln!(out, "{indent}{}", node.kind)?;
        } else {
            let props = serde_json::to_string(&node.props)
                .map_err(|err| BuildError::InvalidBundle(err.to_string()))?;
            writeln!(out, "{indent}{} {props}", node.kind)?;
        }
        write_tree(out, &node.children, depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_bundle(workdir: &Path, text: &str) {
        let path = paths::semantic_bundle_path(workdir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    fn render(workdir: &Path, target: InspectTarget) -> String {
        let mut out = Vec::<u8>::new();
        inspect(workdir, target, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_targets() {
        assert_eq!(InspectTarget::parse(Some("ui")).unwrap(), InspectTarget::Ui);
        assert_eq!(
            InspectTarget::parse(Some("semantic")).unwrap(),
            InspectTarget::Semantic
        );
        let err = InspectTarget::parse(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown inspect target: (none) (available targets: ui, semantic)"
        );
        assert_eq!(err.code(), "UnknownInspectTarget");
    }

    #[test]
    fn test_ui_tree() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(
            dir.path(),
            r#"{"ui":{"components":[{"type":"column","props":{},"children":[
                {"type":"text","props":{"content":"Hello Inspector"}},
                {"type":"button","props":{"label":"Click","action":"onClick"}}
            ]}]}}"#,
        );

        assert_eq!(
            render(dir.path(), InspectTarget::Ui),
            "UI Tree:\n\ncolumn\n  text {\"content\":\"Hello Inspector\"}\n  button {\"label\":\"Click\",\"action\":\"onClick\"}\n"
        );
    }

    #[test]
    fn test_semantic_keeps_key_order() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), r#"{"ui":{"components":[],"layout":{}},"zeta":1,"alpha":2}"#);

        let text = render(dir.path(), InspectTarget::Semantic);
        assert!(text.starts_with("Semantic Bundle:\n\n{\n  \"ui\": {"));
        assert!(text.find("\"zeta\"").unwrap() < text.find("\"alpha\"").unwrap());
    }

    #[test]
    fn test_missing_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let err = inspect(dir.path(), InspectTarget::Semantic, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, BuildError::BundleNotFound(_)));
    }
}
