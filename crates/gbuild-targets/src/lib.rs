//! Target platform definitions for gbuild.
//!
//! A target is an (operating system, architecture) pair named the way the Go
//! toolchain names them (`GOOS`/`GOARCH`). The set of pairs gbuild accepts is
//! fixed at compile time in [`PlatformTable::builtin`].

pub mod error;
pub mod host;
pub mod platform;

pub use error::{Result, TargetError};
pub use host::HostPlatform;
pub use platform::{PlatformTable, TargetPlatform};
