//! Error types for the build invocation.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The compiler process could not be started.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        /// Program that was being spawned.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The compiler ran but reported failure.
    #[error("compilation failed: `{program}` {status}")]
    CompilerFailed {
        /// Program that failed.
        program: String,
        /// Its exit status.
        status: ExitStatus,
    },
}

impl BuildError {
    /// The compiler's exit code, when it exited with one.
    pub fn compiler_exit_code(&self) -> Option<i32> {
        match self {
            BuildError::CompilerFailed { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;
