use std::path::PathBuf;

use regex::Regex;

use crate::command::CommandRunner;
use crate::error::{ReleaseError, Result};

/// Git operations needed by the release workflow, delegated to the
/// system `git` binary through a [CommandRunner].
///
/// Queries whose absence is an expected condition (tag existence) run
/// tolerantly; everything else propagates the command's exit code on
/// failure.
pub struct GitCli<'a, R: CommandRunner> {
    runner: &'a R,
}

/// Discover the repository root for the current working directory.
pub fn discover_root<R: CommandRunner>(runner: &R) -> Result<PathBuf> {
    let output = runner.run_checked("git", &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(output.stdout.trim()))
}

impl<'a, R: CommandRunner> GitCli<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        GitCli { runner }
    }

    /// Most recent release tag with the given prefix.
    ///
    /// Candidates are sorted newest-first by `version:refname` and
    /// filtered to tags whose suffix is version-shaped, so stray tags
    /// like `v-backup` never become the diff baseline.
    pub fn latest_tag(&self, prefix: &str) -> Result<Option<String>> {
        let glob = format!("{}*", prefix);
        let output = self
            .runner
            .run_checked("git", &["tag", "--list", &glob, "--sort=-version:refname"])?;

        let pattern = format!(
            r"^{}\d+\.\d+\.\d+(-[0-9A-Za-z.-]+)?$",
            regex::escape(prefix)
        );
        let shape = Regex::new(&pattern)
            .map_err(|_| ReleaseError::config(format!("Invalid tag prefix: '{}'", prefix)))?;

        Ok(output.lines().into_iter().find(|tag| shape.is_match(tag)))
    }

    /// Paths changed between a tag and HEAD.
    pub fn changed_files_since(&self, tag: &str) -> Result<Vec<String>> {
        let range = format!("{}..HEAD", tag);
        let output = self
            .runner
            .run_checked("git", &["diff", "--name-only", &range])?;
        Ok(output.lines())
    }

    /// Whether a tag already exists.
    ///
    /// Tolerant probe: a failing `git tag --list` reads as "not found".
    pub fn tag_exists(&self, tag: &str) -> Result<bool> {
        let output = self.runner.run("git", &["tag", "--list", tag])?;
        Ok(output.lines().iter().any(|line| line == tag))
    }

    /// Stage a file for commit.
    pub fn stage(&self, path: &str) -> Result<()> {
        self.runner.run_checked("git", &["add", path])?;
        Ok(())
    }

    /// Commit staged changes.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.runner.run_checked("git", &["commit", "-m", message])?;
        Ok(())
    }

    /// Create a lightweight tag on HEAD.
    pub fn create_tag(&self, tag: &str) -> Result<()> {
        self.runner.run_checked("git", &["tag", tag])?;
        Ok(())
    }

    /// Push the branch head, and the tag if one was created this run,
    /// in a single atomic operation: both refs land or neither does.
    pub fn push(&self, remote: &str, branch: &str, tag: Option<&str>) -> Result<()> {
        let head_ref = format!("HEAD:{}", branch);
        let mut args = vec!["push", "--atomic", remote, head_ref.as_str()];

        let tag_ref = tag.map(|t| format!("refs/tags/{}", t));
        if let Some(ref tag_ref) = tag_ref {
            args.push(tag_ref.as_str());
        }

        self.runner.run_checked("git", &args)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandOutput, MockRunner};

    #[test]
    fn test_discover_root_trims_output() {
        let mut runner = MockRunner::new();
        runner.respond_success("git rev-parse --show-toplevel", "/repo/root\n");

        assert_eq!(discover_root(&runner).unwrap(), PathBuf::from("/repo/root"));
    }

    #[test]
    fn test_latest_tag_picks_first_version_shaped() {
        let mut runner = MockRunner::new();
        runner.respond_success(
            "git tag --list v* --sort=-version:refname",
            "v-backup\nv1.2.0\nv1.1.0\n",
        );

        let git = GitCli::new(&runner);
        assert_eq!(git.latest_tag("v").unwrap(), Some("v1.2.0".to_string()));
    }

    #[test]
    fn test_latest_tag_accepts_prerelease_suffix() {
        let mut runner = MockRunner::new();
        runner.respond_success(
            "git tag --list v* --sort=-version:refname",
            "v2.0.0-rc.1\nv1.9.0\n",
        );

        let git = GitCli::new(&runner);
        assert_eq!(git.latest_tag("v").unwrap(), Some("v2.0.0-rc.1".to_string()));
    }

    #[test]
    fn test_latest_tag_none_when_no_tags() {
        let mut runner = MockRunner::new();
        runner.respond_success("git tag --list v* --sort=-version:refname", "");

        let git = GitCli::new(&runner);
        assert_eq!(git.latest_tag("v").unwrap(), None);
    }

    #[test]
    fn test_latest_tag_escapes_prefix() {
        let mut runner = MockRunner::new();
        runner.respond_success(
            "git tag --list release.* --sort=-version:refname",
            "releaseX1.0.0\nrelease.1.0.0\n",
        );

        let git = GitCli::new(&runner);
        // A literal '.' in the prefix must not match 'X'.
        assert_eq!(
            git.latest_tag("release.").unwrap(),
            Some("release.1.0.0".to_string())
        );
    }

    #[test]
    fn test_changed_files_since() {
        let mut runner = MockRunner::new();
        runner.respond_success(
            "git diff --name-only v1.0.0..HEAD",
            "packages/headless/src/index.ts\nREADME.md\n",
        );

        let git = GitCli::new(&runner);
        assert_eq!(
            git.changed_files_since("v1.0.0").unwrap(),
            vec!["packages/headless/src/index.ts", "README.md"]
        );
    }

    #[test]
    fn test_tag_exists_exact_match_only() {
        let mut runner = MockRunner::new();
        runner.respond_success("git tag --list v1.0.0", "v1.0.0\n");
        runner.respond_success("git tag --list v1.0.1", "");

        let git = GitCli::new(&runner);
        assert!(git.tag_exists("v1.0.0").unwrap());
        assert!(!git.tag_exists("v1.0.1").unwrap());
    }

    #[test]
    fn test_tag_exists_tolerates_command_failure() {
        let mut runner = MockRunner::new();
        runner.respond("git tag --list v1.0.0", CommandOutput::failure(128, "boom"));

        let git = GitCli::new(&runner);
        assert!(!git.tag_exists("v1.0.0").unwrap());
    }

    #[test]
    fn test_push_with_tag_is_atomic() {
        let runner = MockRunner::new();
        let git = GitCli::new(&runner);
        git.push("origin", "main", Some("v1.0.1")).unwrap();

        assert_eq!(
            runner.calls(),
            vec!["git push --atomic origin HEAD:main refs/tags/v1.0.1"]
        );
    }

    #[test]
    fn test_push_without_tag() {
        let runner = MockRunner::new();
        let git = GitCli::new(&runner);
        git.push("origin", "main", None).unwrap();

        assert_eq!(runner.calls(), vec!["git push --atomic origin HEAD:main"]);
    }

    #[test]
    fn test_checked_operation_propagates_failure() {
        let mut runner = MockRunner::new();
        runner.respond(
            "git diff --name-only v1.0.0..HEAD",
            CommandOutput::failure(129, "bad revision\n"),
        );

        let git = GitCli::new(&runner);
        let err = git.changed_files_since("v1.0.0").unwrap_err();
        assert_eq!(err.exit_code(), 129);
    }
}
