//! Embeds build metadata reported by `gbuild -version`.

use std::env;
use std::process::Command;

fn main() {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=GBUILD_RUSTC_VERSION={rustc_version}");

    // Release pipelines set this to a timestamp; local builds report "unknown".
    println!("cargo:rerun-if-env-changed=GBUILD_BUILD_TIME");
    let build_time = env::var("GBUILD_BUILD_TIME").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=GBUILD_BUILD_TIME={build_time}");
}
