//! The default action: resolve the target, run `go build`, report.

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::Args;
use gbuild_invoke::{hash, BuildOptions, BuildRequest, Toolchain, DEFAULT_OUT_DIR};
use gbuild_targets::{HostPlatform, PlatformTable};

use crate::config::LoadedConfig;

/// Build flags as given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct BuildFlags {
    /// Target OS (linux/windows/darwin), default is current
    #[arg(long, value_name = "OS")]
    pub os: Option<String>,

    /// Target Arch (amd64/arm64), default is current
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Output file path (optional)
    #[arg(
        short = 'o',
        long = "output",
        alias = "o",
        value_name = "PATH",
        allow_hyphen_values = true
    )]
    pub output: Option<PathBuf>,

    /// Build tags (optional)
    #[arg(long, value_name = "TAGS", allow_hyphen_values = true)]
    pub tags: Option<String>,

    /// Linker flags (optional)
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
    pub ldflags: Option<String>,

    /// Print SHA256 hash of output binary
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
    )]
    pub hash: Option<bool>,

    /// Enable CGO (default false)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
    )]
    pub cgo: Option<bool>,
}

/// Everything a build needs after flags and config are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    /// Unvalidated build inputs.
    pub options: BuildOptions,
    /// Compiler to run.
    pub toolchain: Toolchain,
    /// Print the digest after a successful build.
    pub hash: bool,
}

impl BuildPlan {
    /// Merge flags over config over built-in defaults.
    pub fn merge(flags: &BuildFlags, config: Option<&LoadedConfig>) -> Self {
        let build = config.map(|c| &c.config.build);
        let program = config.and_then(|c| c.config.toolchain.program.clone());

        let options = BuildOptions {
            os: flags
                .os
                .clone()
                .or_else(|| build.and_then(|b| b.os.clone())),
            arch: flags
                .arch
                .clone()
                .or_else(|| build.and_then(|b| b.arch.clone())),
            output: flags.output.clone(),
            out_dir: config
                .and_then(LoadedConfig::out_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            tags: flags
                .tags
                .clone()
                .or_else(|| build.and_then(|b| b.tags.clone())),
            ldflags: flags
                .ldflags
                .clone()
                .or_else(|| build.and_then(|b| b.ldflags.clone())),
            cgo: flags
                .cgo
                .or_else(|| build.and_then(|b| b.cgo))
                .unwrap_or(false),
        };

        Self {
            options,
            toolchain: program.map(Toolchain::new).unwrap_or_default(),
            hash: flags
                .hash
                .or_else(|| build.and_then(|b| b.hash))
                .unwrap_or(false),
        }
    }
}

/// Resolve, compile, and optionally hash. Returns the validated request.
pub fn run(plan: &BuildPlan, host: &HostPlatform) -> Result<BuildRequest> {
    let request = BuildRequest::resolve(&plan.options, host, &PlatformTable::builtin())?;
    log::info!(
        "building {} -> {}",
        request.target(),
        request.output().display()
    );

    plan.toolchain.compile(&request)?;
    println!();
    println!("Successfully built: {}", request.output().display());

    if plan.hash {
        hash::report(request.output());
    }
    Ok(request)
}
