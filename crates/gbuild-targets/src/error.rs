//! Error types for target platform validation.

/// Errors raised when a requested target is not in the platform table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The operating system is not a key of the platform table.
    #[error("unsupported OS: {os}. Run `gbuild -help` for supported platforms.")]
    UnsupportedOs {
        /// The rejected OS name.
        os: String,
    },

    /// The architecture is not supported for an otherwise valid OS.
    #[error("unsupported architecture {arch:?} for OS {os:?}")]
    UnsupportedArch {
        /// The (valid) OS name.
        os: String,
        /// The rejected architecture name.
        arch: String,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
