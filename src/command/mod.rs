//! External command execution abstraction
//!
//! Every interaction with the outside world (git, npm) goes through the
//! [CommandRunner] trait, which returns a structured result of exit
//! code and captured output streams. The concrete implementations are:
//!
//! - [system::SystemRunner]: blocking subprocess execution in the
//!   repository root
//! - [mock::MockRunner]: scripted responses and recorded invocations
//!   for tests
//!
//! Decision logic depends only on the trait, so it can be exercised
//! without a real repository or network access.

pub mod mock;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;

use crate::error::{ReleaseError, Result};

/// Captured result of one external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Process exit code (1 if terminated without one)
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful invocation with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed invocation with the given exit code and stderr
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success_status(&self) -> bool {
        self.code == 0
    }

    /// Non-empty output lines, trimmed
    pub fn lines(&self) -> Vec<String> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One command-line, rendered for display and error messages
pub fn render_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| a.to_string()));
    parts.join(" ")
}

/// Blocking external command execution
pub trait CommandRunner {
    /// Run a command to completion, capturing output.
    ///
    /// A non-zero exit is NOT an error at this level; callers that
    /// tolerate failure inspect the returned output instead.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Run a command whose failure must abort the release.
    ///
    /// On a non-zero exit the captured stdout/stderr are echoed for
    /// diagnostic visibility and the command's own exit code is
    /// propagated in the error.
    fn run_checked(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = self.run(program, args)?;
        if !output.success_status() {
            if !output.stdout.is_empty() {
                print!("{}", output.stdout);
            }
            if !output.stderr.is_empty() {
                eprint!("{}", output.stderr);
            }
            return Err(ReleaseError::Command {
                command: render_command(program, args),
                code: output.code,
            });
        }
        Ok(output)
    }
}
