use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Represents the complete configuration for pkg-release.
///
/// One explicit record threaded through the whole run; nothing below the
/// CLI layer reads the process environment directly.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Repository-relative directory containing package.json
    #[serde(default = "default_package_dir")]
    pub package_dir: String,

    /// Release tag prefix (tags are `{prefix}{version}`)
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Path prefixes whose changes warrant a release; empty means
    /// "derive the defaults from `package_dir`"
    #[serde(default)]
    pub release_paths: Vec<String>,

    /// Registry base URL for published-version lookup
    #[serde(default = "default_registry")]
    pub registry: String,

    /// Remote to push to
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch the release head is pushed to
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Pipeline output file; None disables key=value output
    #[serde(skip)]
    pub github_output: Option<PathBuf>,
}

fn default_package_dir() -> String {
    "packages/headless".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_registry() -> String {
    "https://registry.npmjs.org/".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            package_dir: default_package_dir(),
            tag_prefix: default_tag_prefix(),
            release_paths: Vec::new(),
            registry: default_registry(),
            remote: default_remote(),
            branch: default_branch(),
            github_output: None,
        }
    }
}

impl Config {
    /// Release path prefixes with trailing slashes trimmed.
    ///
    /// An empty configured list derives the defaults from the package
    /// directory: its sources, manifest, and build configuration files.
    pub fn release_paths(&self) -> Vec<String> {
        let paths = if self.release_paths.is_empty() {
            let dir = self.package_dir.trim_end_matches('/');
            vec![
                format!("{}/src", dir),
                format!("{}/package.json", dir),
                format!("{}/tsup.config.ts", dir),
                format!("{}/tsconfig.json", dir),
                format!("{}/biome.json", dir),
            ]
        } else {
            self.release_paths.clone()
        };

        paths
            .iter()
            .map(|p| p.trim_end_matches('/').to_string())
            .collect()
    }

    /// Absolute path to the package manifest.
    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(self.package_dir.trim_end_matches('/'))
            .join("package.json")
    }

    /// Repository-relative manifest path, as handed to `git add`.
    pub fn manifest_rel_path(&self) -> String {
        format!("{}/package.json", self.package_dir.trim_end_matches('/'))
    }

    /// Apply environment variable overrides on top of file/default values.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env(&mut self) {
        if let Some(dir) = env_value("PACKAGE_DIR") {
            self.package_dir = dir;
        }
        if let Some(prefix) = env_value("RELEASE_TAG_PREFIX") {
            self.tag_prefix = prefix;
        }
        if let Some(paths) = env_value("RELEASE_PATHS") {
            self.release_paths = paths
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(registry) = env_value("NPM_REGISTRY") {
            self.registry = registry;
        }
        if let Some(remote) = env_value("RELEASE_REMOTE") {
            self.remote = remote;
        }
        if let Some(branch) = env_value("RELEASE_BRANCH") {
            self.branch = branch;
        }
        if let Some(output) = env_value("GITHUB_OUTPUT") {
            self.github_output = Some(PathBuf::from(output));
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Loads configuration from file, environment, or defaults.
///
/// File lookup order:
/// 1. Custom path provided as parameter
/// 2. `pkgrelease.toml` in current directory
/// 3. `~/.config/.pkgrelease.toml` in user config directory
/// 4. Default configuration if no file found
///
/// Environment variables override whatever the file provided.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        Some(fs::read_to_string(path)?)
    } else if Path::new("./pkgrelease.toml").exists() {
        Some(fs::read_to_string("./pkgrelease.toml")?)
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".pkgrelease.toml");
        if config_path.exists() {
            Some(fs::read_to_string(config_path)?)
        } else {
            None
        }
    } else {
        None
    };

    let mut config = match config_str {
        Some(raw) => toml::from_str(&raw)
            .map_err(|e| ReleaseError::config(format!("invalid pkgrelease.toml: {}", e)))?,
        None => Config::default(),
    };

    config.apply_env();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_release_paths_derive_from_package_dir() {
        let config = Config {
            package_dir: "packages/editor".to_string(),
            ..Config::default()
        };
        let paths = config.release_paths();
        assert!(paths.contains(&"packages/editor/src".to_string()));
        assert!(paths.contains(&"packages/editor/package.json".to_string()));
        assert_eq!(paths.len(), 5);
    }

    #[test]
    fn test_release_paths_trim_trailing_slash() {
        let config = Config {
            release_paths: vec!["packages/editor/src/".to_string()],
            ..Config::default()
        };
        assert_eq!(config.release_paths(), vec!["packages/editor/src"]);
    }

    #[test]
    fn test_manifest_paths() {
        let config = Config {
            package_dir: "packages/editor/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.manifest_rel_path(), "packages/editor/package.json");
        assert_eq!(
            config.manifest_path(Path::new("/repo")),
            PathBuf::from("/repo/packages/editor/package.json")
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.package_dir, "packages/headless");
        assert_eq!(config.tag_prefix, "v");
        assert_eq!(config.registry, "https://registry.npmjs.org/");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.branch, "main");
        assert!(config.github_output.is_none());
    }
}
