//! The static table of supported target platforms.

use std::fmt;

use crate::error::{Result, TargetError};

/// Supported operating systems and their architectures, in listing order.
///
/// This list is maintained by hand and is not checked against
/// `go tool dist list`; a toolchain may support pairs missing here.
const SUPPORTED_PLATFORMS: &[(&str, &[&str])] = &[
    ("linux", &["amd64", "arm64"]),
    ("windows", &["amd64", "arm64"]),
    ("darwin", &["amd64", "arm64"]),
];

/// Mapping from OS name to the architectures gbuild accepts for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

impl PlatformTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            entries: SUPPORTED_PLATFORMS,
        }
    }

    /// Iterate `(os, arches)` pairs in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static [&'static str])> + '_ {
        self.entries.iter().copied()
    }

    /// Supported architectures for `os`, or `None` if the OS is unknown.
    pub fn arches(&self, os: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|(name, _)| *name == os)
            .map(|(_, arches)| *arches)
    }

    /// Whether `(os, arch)` is an accepted pair.
    pub fn supports(&self, os: &str, arch: &str) -> bool {
        self.arches(os).is_some_and(|arches| arches.contains(&arch))
    }

    /// Check `(os, arch)` against the table.
    ///
    /// The OS is checked first, so an unknown OS is reported as such even if
    /// the architecture is also unknown.
    pub fn validate(&self, os: &str, arch: &str) -> Result<TargetPlatform> {
        let arches = self.arches(os).ok_or_else(|| TargetError::UnsupportedOs {
            os: os.to_string(),
        })?;
        if !arches.contains(&arch) {
            return Err(TargetError::UnsupportedArch {
                os: os.to_string(),
                arch: arch.to_string(),
            });
        }
        Ok(TargetPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        })
    }
}

impl Default for PlatformTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A validated target platform.
///
/// Only [`PlatformTable::validate`] constructs one, so holding a
/// `TargetPlatform` means the pair is in the table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetPlatform {
    os: String,
    arch: String,
}

impl TargetPlatform {
    /// Operating system name (`GOOS`).
    pub fn os(&self) -> &str {
        &self.os
    }

    /// Architecture name (`GOARCH`).
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Whether binaries for this target carry an `.exe` suffix.
    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Default artifact file name, e.g. `build-linux-amd64` or
    /// `build-windows-arm64.exe`.
    pub fn artifact_name(&self) -> String {
        let mut name = format!("build-{}-{}", self.os, self.arch);
        if self.is_windows() {
            name.push_str(".exe");
        }
        name
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
