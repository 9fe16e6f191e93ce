//! Error types for package resolution and module loading.
//!
//! Resolution misses (unknown package, unsatisfiable constraint, no module for
//! a name) are not errors: they surface as `None` or are skipped. Only failures
//! while touching actual files end up here.

use std::path::PathBuf;

/// Loader errors.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A file that was expected to be a module does not declare a usable name.
    #[error("malformed module {}: {reason}", path.display())]
    MalformedModule { path: PathBuf, reason: String },

    /// The module file could not be loaded into the process.
    #[error("failed to load module {}: {reason}", path.display())]
    ModuleLoad { path: PathBuf, reason: String },

    /// Filesystem access failed.
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A package manifest could not be read or parsed.
    #[error("invalid package manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    /// A runtime profile string could not be parsed.
    #[error("invalid runtime profile '{profile}': {reason}")]
    InvalidProfile { profile: String, reason: String },

    /// A dependency version range could not be parsed.
    #[error("invalid version range '{range}': {reason}")]
    InvalidVersionRange { range: String, reason: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl LoadError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Bad input
            Self::InvalidProfile { .. } => 2,
            Self::InvalidVersionRange { .. } => 2,
            Self::Config { .. } => 2,

            // Package folder problems
            Self::Manifest { .. } => 3,
            Self::Io { .. } => 3,

            // Module problems
            Self::MalformedModule { .. } => 4,
            Self::ModuleLoad { .. } => 4,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;
