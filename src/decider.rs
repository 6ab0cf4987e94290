//! Pure release decisions
//!
//! Nothing here touches the filesystem, the environment, or a
//! subprocess; tag existence is injected as a closure so the bump loop
//! stays testable without git.

use crate::error::{ReleaseError, Result};
use crate::version::Version;

/// How the target version relates to what is published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionResolution {
    /// The current version cannot be published as-is; bump the patch
    Bump,
    /// Release the current version unchanged
    ReleaseAsIs,
}

/// Whether any changed file warrants a release.
///
/// A file is relevant if it equals a release path exactly or lives
/// under it (`prefix + "/"`). Callers handle the no-prior-tag case,
/// where relevance is vacuously true.
pub fn is_release_relevant(changed_files: &[String], release_paths: &[String]) -> bool {
    changed_files.iter().any(|file| {
        release_paths
            .iter()
            .any(|prefix| file == prefix || file.starts_with(&format!("{}/", prefix)))
    })
}

/// Decide whether the current version must be bumped before release.
///
/// - never published + current is the 0.0.0 sentinel: bump (bootstrap)
/// - never published otherwise: release as-is
/// - published == current: bump, the local version has not advanced
/// - published > current: fatal, local state trails the registry
/// - published < current: release as-is
pub fn resolve_target_version(
    current: &Version,
    published: Option<&Version>,
) -> Result<VersionResolution> {
    match published {
        None => {
            if *current == Version::ZERO {
                Ok(VersionResolution::Bump)
            } else {
                Ok(VersionResolution::ReleaseAsIs)
            }
        }
        Some(published) => {
            if current == published {
                Ok(VersionResolution::Bump)
            } else if current < published {
                Err(ReleaseError::VersionBehind {
                    local: current.to_string(),
                    published: published.to_string(),
                })
            } else {
                Ok(VersionResolution::ReleaseAsIs)
            }
        }
    }
}

/// First patch increment of `current` whose tag does not exist yet.
///
/// Returns the chosen version and the tags that were skipped over, so
/// the caller can log each collision. The loop is monotonic and
/// terminates because existing tags are finite.
pub fn next_available_version<F>(
    current: &Version,
    tag_prefix: &str,
    mut tag_exists: F,
) -> Result<(Version, Vec<String>)>
where
    F: FnMut(&str) -> Result<bool>,
{
    let mut candidate = current.bump_patch();
    let mut skipped = Vec::new();

    loop {
        let tag = format!("{}{}", tag_prefix, candidate);
        if !tag_exists(&tag)? {
            return Ok((candidate, skipped));
        }
        skipped.push(tag);
        candidate = candidate.bump_patch();
    }
}
