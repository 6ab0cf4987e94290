use std::cell::RefCell;
use std::collections::HashMap;

use crate::command::{render_command, CommandOutput, CommandRunner};
use crate::error::Result;

/// Mock runner for testing without real subprocesses.
///
/// Responses are scripted against the rendered command line; anything
/// unscripted succeeds with empty output. Every invocation is recorded
/// so tests can assert which commands ran (and which did not).
pub struct MockRunner {
    responses: HashMap<String, CommandOutput>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create a new mock with no scripted responses
    pub fn new() -> Self {
        MockRunner {
            responses: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Script a response for an exact command line
    pub fn respond(&mut self, command: impl Into<String>, output: CommandOutput) {
        self.responses.insert(command.into(), output);
    }

    /// Script a successful response with the given stdout
    pub fn respond_success(&mut self, command: impl Into<String>, stdout: impl Into<String>) {
        self.respond(command, CommandOutput::success(stdout));
    }

    /// Script a failing response with the given exit code and stderr
    pub fn respond_failure(
        &mut self,
        command: impl Into<String>,
        code: i32,
        stderr: impl Into<String>,
    ) {
        self.respond(command, CommandOutput::failure(code, stderr));
    }

    /// Every command line run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any recorded command line contains the given fragment
    pub fn invoked(&self, fragment: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.contains(fragment))
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let rendered = render_command(program, args);
        self.calls.borrow_mut().push(rendered.clone());

        Ok(self
            .responses
            .get(&rendered)
            .cloned()
            .unwrap_or_else(|| CommandOutput::success("")))
    }
}
