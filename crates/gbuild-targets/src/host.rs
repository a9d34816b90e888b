//! Host platform detection.
//!
//! Rust and Go name platforms differently (`macos` vs `darwin`, `x86_64` vs
//! `amd64`). The host is reported in Go's vocabulary so it can be used as a
//! default target directly.

use std::env::consts;

/// The platform gbuild itself is running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    /// Host OS in `GOOS` naming.
    pub os: String,
    /// Host architecture in `GOARCH` naming.
    pub arch: String,
}

impl HostPlatform {
    /// Query the running host.
    pub fn detect() -> Self {
        Self::from_rust_names(consts::OS, consts::ARCH)
    }

    /// Translate Rust platform names to Go names.
    ///
    /// Names without a known Go equivalent pass through unchanged.
    pub fn from_rust_names(os: &str, arch: &str) -> Self {
        Self {
            os: go_os(os).to_string(),
            arch: go_arch(arch).to_string(),
        }
    }
}

fn go_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn go_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}
