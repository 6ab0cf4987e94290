use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Machine-readable outputs for the calling pipeline.
///
/// Appends `name=value` lines to the configured `GITHUB_OUTPUT` file;
/// with no file configured every write is a no-op. Each key is written
/// at most once per run, at the point the decision procedure reaches
/// it, including on the paths that then abort.
pub struct OutputSink {
    path: Option<PathBuf>,
}

impl OutputSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        OutputSink { path }
    }

    /// Append one `name=value` line.
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}={}", name, value)?;
        Ok(())
    }

    /// Append a boolean as `true`/`false`.
    pub fn set_bool(&self, name: &str, value: bool) -> Result<()> {
        self.set(name, if value { "true" } else { "false" })
    }
}
