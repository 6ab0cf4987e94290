use std::path::{Path, PathBuf};
use std::process::Command;

use crate::command::{CommandOutput, CommandRunner};
use crate::error::Result;

/// Runs commands as real subprocesses, pinned to one working directory.
///
/// All release commands run from the repository root so that git paths
/// and the manifest path resolve consistently regardless of where the
/// tool was invoked.
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    /// Create a runner executing in the given directory
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        SystemRunner { cwd: cwd.into() }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .output()?;

        Ok(CommandOutput {
            // Termination by signal carries no code; treat it as a
            // generic failure.
            code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
