//! Well-known locations inside a project working directory.

use std::path::{Path, PathBuf};

/// Directory holding every generated artifact.
pub const FORGE_DIR: &str = ".forge";

/// Project configuration file name.
pub const CONFIG_FILE: &str = "forge.config.json";

/// Location of the semantic bundle, `.forge/semantic/semantic.json`.
pub fn semantic_bundle_path(workdir: &Path) -> PathBuf {
    workdir.join(FORGE_DIR).join("semantic").join("semantic.json")
}

/// Root of all native output trees, `.forge/native`.
pub fn native_root(workdir: &Path) -> PathBuf {
    workdir.join(FORGE_DIR).join("native")
}

/// Location of the project configuration file.
pub fn config_path(workdir: &Path) -> PathBuf {
    workdir.join(CONFIG_FILE)
}

/// Whether the semantic bundle is present. Freshness is not checked.
pub fn bundle_exists(workdir: &Path) -> bool {
    semantic_bundle_path(workdir).is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_path_layout() {
        let path = semantic_bundle_path(Path::new("/project"));
        assert!(path.ends_with(".forge/semantic/semantic.json"));
        assert!(native_root(Path::new("/project")).ends_with(".forge/native"));
    }

    #[test]
    fn test_bundle_exists() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!bundle_exists(dir.path()));

        let path = semantic_bundle_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{}").unwrap();
        assert!(bundle_exists(dir.path()));
    }
}
