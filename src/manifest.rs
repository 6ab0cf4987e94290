use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// The package manifest (`package.json`).
///
/// Only `name` and `version` are interpreted; every other field is
/// carried through `extra` untouched so a rewrite preserves the file's
/// remaining content and field order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Manifest {
    pub name: String,
    pub version: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    /// Load the manifest from disk.
    ///
    /// A missing file is fatal before any other release logic runs.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReleaseError::manifest(format!(
                "Missing package.json at {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            ReleaseError::manifest(format!("Invalid package.json at {}: {}", path.display(), e))
        })
    }

    /// Write the manifest back with two-space indentation and a
    /// trailing newline, matching npm conventions.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut rendered = serde_json::to_string_pretty(self)
            .map_err(|e| ReleaseError::manifest(format!("Failed to serialize manifest: {}", e)))?;
        rendered.push('\n');
        fs::write(path, rendered)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_fixture(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join("package.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_reads_name_and_version() {
        let dir = tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            r#"{"name": "headless", "version": "1.2.3", "license": "MIT"}"#,
        );

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.name, "headless");
        assert_eq!(manifest.version, "1.2.3");
        assert_eq!(
            manifest.extra.get("license"),
            Some(&Value::String("MIT".to_string()))
        );
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let dir = tempdir().unwrap();
        let err = Manifest::load(&dir.path().join("package.json")).unwrap_err();
        assert!(err.to_string().contains("Missing package.json"));
    }

    #[test]
    fn test_load_invalid_json_is_fatal() {
        let dir = tempdir().unwrap();
        let path = write_fixture(dir.path(), "{not json");
        assert!(Manifest::load(&path).is_err());
    }

    #[test]
    fn test_save_preserves_unknown_fields() {
        let dir = tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            r#"{"name": "headless", "version": "0.1.0", "scripts": {"build": "tsup"}, "sideEffects": false}"#,
        );

        let mut manifest = Manifest::load(&path).unwrap();
        manifest.version = "0.1.1".to_string();
        manifest.save(&path).unwrap();

        let reloaded = Manifest::load(&path).unwrap();
        assert_eq!(reloaded.version, "0.1.1");
        assert!(reloaded.extra.contains_key("scripts"));
        assert_eq!(reloaded.extra.get("sideEffects"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_save_ends_with_newline() {
        let dir = tempdir().unwrap();
        let path = write_fixture(dir.path(), r#"{"name": "pkg", "version": "1.0.0"}"#);

        let manifest = Manifest::load(&path).unwrap();
        manifest.save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with('\n'));
        assert!(written.contains("  \"version\": \"1.0.0\""));
    }
}
