//! Running the Go toolchain for a resolved request.

use std::ffi::OsString;
use std::fs;
use std::process::Command;

use crate::error::{BuildError, Result};
use crate::request::BuildRequest;

/// Compiler program used when none is configured.
pub const DEFAULT_PROGRAM: &str = "go";

/// The external compiler gbuild drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    program: String,
}

impl Toolchain {
    /// A toolchain that runs `program` (looked up on `PATH` if not a path).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program that will be spawned.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for `go build`: output, then tags and ldflags when present.
    pub fn build_args(&self, request: &BuildRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "build".into(),
            "-o".into(),
            request.output().as_os_str().to_owned(),
        ];
        if let Some(tags) = request.tags() {
            args.push("-tags".into());
            args.push(tags.into());
        }
        if let Some(ldflags) = request.ldflags() {
            args.push("-ldflags".into());
            args.push(ldflags.into());
        }
        args
    }

    /// Environment overrides layered on top of the inherited environment.
    pub fn build_env(&self, request: &BuildRequest) -> [(&'static str, String); 3] {
        [
            ("GOOS", request.target().os().to_string()),
            ("GOARCH", request.target().arch().to_string()),
            ("CGO_ENABLED", u8::from(request.cgo()).to_string()),
        ]
    }

    /// Compile `request`, streaming the compiler's output to this process's
    /// stdout and stderr.
    ///
    /// Creates the output's parent directory first. Blocks until the
    /// compiler exits.
    pub fn compile(&self, request: &BuildRequest) -> Result<()> {
        if let Some(parent) = request.output().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| BuildError::CreateOutputDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let args = self.build_args(request);
        log::debug!(
            "running {} {:?} for {}",
            self.program,
            args,
            request.target()
        );

        let status = Command::new(&self.program)
            .args(&args)
            .envs(self.build_env(request))
            .status()
            .map_err(|source| BuildError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::CompilerFailed {
                program: self.program.clone(),
                status,
            });
        }
        log::debug!("{} exited successfully", self.program);
        Ok(())
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}
