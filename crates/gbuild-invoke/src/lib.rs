//! Resolve a build request and run the Go toolchain for it.
//!
//! The flow is linear:
//! 1. [`BuildRequest::resolve`] fills defaults and validates the target.
//! 2. [`Toolchain::compile`] creates the output directory and runs
//!    `go build` with `GOOS`/`GOARCH`/`CGO_ENABLED` set.
//! 3. [`hash::file_sha256`] optionally digests the produced binary.

pub mod error;
pub mod hash;
pub mod request;
pub mod toolchain;

pub use error::{BuildError, Result};
pub use request::{clean_path, BuildOptions, BuildRequest, DEFAULT_OUT_DIR};
pub use toolchain::{Toolchain, DEFAULT_PROGRAM};
