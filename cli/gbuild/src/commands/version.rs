//! `gbuild -version`.

/// Version, build time, and the Rust toolchain gbuild was compiled with.
pub fn render() -> String {
    format!(
        "gbuild version: {}\nBuild time:     {}\nRust version:   {}\n",
        env!("CARGO_PKG_VERSION"),
        env!("GBUILD_BUILD_TIME"),
        env!("GBUILD_RUSTC_VERSION"),
    )
}

/// Print version information.
pub fn run() {
    print!("{}", render());
}
