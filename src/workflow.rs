//! The release decision procedure
//!
//! One sequential pass per invocation: load the manifest, find the
//! latest release tag, test the diff against the release paths, consult
//! the registry, resolve the target version, then apply whichever side
//! effects the flags request. No retries; the calling pipeline owns
//! retry policy.

use std::path::Path;

use crate::command::CommandRunner;
use crate::config::Config;
use crate::decider::{self, VersionResolution};
use crate::error::Result;
use crate::git::GitCli;
use crate::manifest::Manifest;
use crate::outputs::OutputSink;
use crate::registry::RegistryClient;
use crate::ui;
use crate::version::Version;

/// Side-effect gates for one run
///
/// Mirrors the CLI flags but in a format suitable for orchestration
/// logic, so the workflow can be called programmatically without
/// depending on clap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
    /// Write and commit the manifest bump
    pub commit: bool,

    /// Create the release tag
    pub tag: bool,

    /// Push branch head and tag to the remote
    pub push: bool,

    /// Compute and report only; suppress every mutation
    pub dry_run: bool,
}

/// Decision outputs of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Whether a release is warranted
    pub release: bool,

    /// Whether the manifest version was bumped
    pub bumped: bool,

    /// The version being released (current or bumped)
    pub version: String,

    /// The release tag involved in this run, when `--tag` was in effect
    pub tag: Option<String>,
}

/// Run the release decision procedure.
///
/// `root` is the repository root; every git path and the manifest path
/// resolve against it. Pipeline outputs are emitted at the exact point
/// the decision tree reaches them, so `release=false` is written even
/// on the version-behind path that then aborts.
pub fn run_release<R: CommandRunner>(
    root: &Path,
    config: &Config,
    flags: &RunFlags,
    runner: &R,
) -> Result<ReleaseOutcome> {
    let sink = OutputSink::new(config.github_output.clone());
    let git = GitCli::new(runner);

    let manifest_path = config.manifest_path(root);
    let manifest = Manifest::load(&manifest_path)?;
    let current = Version::parse(&manifest.version)?;

    let last_tag = git.latest_tag(&config.tag_prefix)?;

    let relevant = match &last_tag {
        Some(tag) => {
            let changed = git.changed_files_since(tag)?;
            decider::is_release_relevant(&changed, &config.release_paths())
        }
        None => true,
    };

    if !relevant {
        ui::display_status("No release needed: no relevant changes");
        sink.set_bool("release", false)?;
        return Ok(ReleaseOutcome {
            release: false,
            bumped: false,
            version: manifest.version.clone(),
            tag: None,
        });
    }

    let registry = RegistryClient::new(runner, &config.registry);
    let published_raw = registry.published_version(&manifest.name)?;
    match &published_raw {
        Some(version) => ui::display_status(&format!("Latest published version: {}", version)),
        None => ui::display_status("No published version found in registry."),
    }
    let published = published_raw.as_deref().map(Version::parse).transpose()?;

    let resolution = match decider::resolve_target_version(&current, published.as_ref()) {
        Ok(resolution) => resolution,
        Err(err) => {
            // Emit-then-abort: the pipeline still sees release=false
            // before the non-zero exit.
            sink.set_bool("release", false)?;
            return Err(err);
        }
    };

    let mut bumped = false;
    let mut new_version = manifest.version.clone();

    if resolution == VersionResolution::Bump {
        let (next, skipped) =
            decider::next_available_version(&current, &config.tag_prefix, |tag| {
                git.tag_exists(tag)
            })?;
        for tag in &skipped {
            ui::display_status(&format!(
                "Tag {} already exists, trying next patch version.",
                tag
            ));
        }

        new_version = next.to_string();
        ui::display_status(&format!(
            "Bumping version {} -> {}",
            manifest.version, new_version
        ));

        if !flags.dry_run {
            let mut updated = manifest.clone();
            updated.version = new_version.clone();
            updated.save(&manifest_path)?;
        }
        bumped = true;
    }

    sink.set_bool("bumped", bumped)?;
    sink.set_bool("release", true)?;
    sink.set("version", &new_version)?;

    if flags.dry_run {
        ui::display_status("Dry run: skipping commit, tag, and push.");
        return Ok(ReleaseOutcome {
            release: true,
            bumped,
            version: new_version,
            tag: None,
        });
    }

    if flags.commit && bumped {
        git.stage(&config.manifest_rel_path())?;
        git.commit(&format!(
            "chore(release): bump {} to {} [skip ci]",
            manifest.name, new_version
        ))?;
    }

    let mut tag_name = None;
    if flags.tag {
        let tag = format!("{}{}", config.tag_prefix, new_version);
        if git.tag_exists(&tag)? {
            ui::display_status(&format!("Tag {} already exists, skipping tag creation.", tag));
        } else {
            git.create_tag(&tag)?;
            ui::display_success(&format!("Created tag: {}", tag));
        }
        // Pushed even when creation was skipped; the tag may exist
        // locally without having reached the remote.
        tag_name = Some(tag);
    }

    if flags.push {
        git.push(&config.remote, &config.branch, tag_name.as_deref())?;
        ui::display_success(&format!(
            "Pushed HEAD:{} to {}",
            config.branch, config.remote
        ));
    }

    Ok(ReleaseOutcome {
        release: true,
        bumped,
        version: new_version,
        tag: tag_name,
    })
}
