use crate::error::{ReleaseError, Result};
use std::fmt;

/// Semantic version representation
///
/// Ordering is derived over the (major, minor, patch) triple, so
/// comparisons are numeric, never string-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// The unpublished-package sentinel
    pub const ZERO: Version = Version {
        major: 0,
        minor: 0,
        patch: 0,
    };

    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string (e.g., "1.2.3" or "1.2.3-beta.1").
    ///
    /// Anything after the first `-` is a pre-release suffix and is
    /// ignored; the remainder must be exactly three dot-separated
    /// non-negative integers.
    pub fn parse(version: &str) -> Result<Self> {
        let main = version.split('-').next().unwrap_or(version);

        let parts: Vec<&str> = main.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::version(format!(
                "Unsupported version format: '{}' - expected X.Y.Z",
                version
            )));
        }

        let major = parts[0].parse::<u64>().map_err(|_| {
            ReleaseError::version(format!("Invalid major version: {}", parts[0]))
        })?;
        let minor = parts[1].parse::<u64>().map_err(|_| {
            ReleaseError::version(format!("Invalid minor version: {}", parts[1]))
        })?;
        let patch = parts[2].parse::<u64>().map_err(|_| {
            ReleaseError::version(format!("Invalid patch version: {}", parts[2]))
        })?;

        Ok(Version::new(major, minor, patch))
    }

    /// Next patch version, holding major and minor fixed.
    pub fn bump_patch(&self) -> Version {
        Version::new(self.major, self.minor, self.patch + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
