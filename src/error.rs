use thiserror::Error;

/// Unified error type for pkg-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Command `{command}` failed with exit code {code}")]
    Command { command: String, code: i32 },

    #[error("Local version {local} is behind published {published}")]
    VersionBehind { local: String, published: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pkg-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Exit status the process should terminate with for this error.
    ///
    /// Delegated command failures propagate the command's own exit code;
    /// everything else is an explicit 1, including the version-behind
    /// policy guard.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::Command { code, .. } => *code,
            _ => 1,
        }
    }
}
