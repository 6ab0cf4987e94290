use crate::command::CommandRunner;
use crate::error::Result;

/// Published-version lookup against an npm-compatible registry.
///
/// Lookup failures (network error, package never published) are not
/// errors: they read as "no published version" and feed the bootstrap
/// branch of the version resolution.
pub struct RegistryClient<'a, R: CommandRunner> {
    runner: &'a R,
    registry: String,
}

impl<'a, R: CommandRunner> RegistryClient<'a, R> {
    pub fn new(runner: &'a R, registry: impl Into<String>) -> Self {
        RegistryClient {
            runner,
            registry: registry.into(),
        }
    }

    /// The version currently published for `package`, if any.
    pub fn published_version(&self, package: &str) -> Result<Option<String>> {
        let output = self.runner.run(
            "npm",
            &["view", package, "version", "--registry", &self.registry],
        )?;

        if !output.success_status() {
            return Ok(None);
        }

        let version = output.stdout.trim();
        if version.is_empty() {
            Ok(None)
        } else {
            Ok(Some(version.to_string()))
        }
    }
}
