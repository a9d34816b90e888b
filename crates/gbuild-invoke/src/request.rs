//! Build request resolution: defaults, validation, and output path.

use std::path::{Component, Path, PathBuf};

use gbuild_targets::{HostPlatform, PlatformTable, TargetPlatform};

/// Directory synthesized output paths are placed in when none is configured.
pub const DEFAULT_OUT_DIR: &str = "bin";

/// Raw build inputs, before defaults are applied.
///
/// Empty strings count as unset, matching how the flags behave when given
/// `-os ""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Requested target OS.
    pub os: Option<String>,
    /// Requested target architecture.
    pub arch: Option<String>,
    /// Explicit output path.
    pub output: Option<PathBuf>,
    /// Directory for synthesized output paths.
    pub out_dir: PathBuf,
    /// Build tags passed through to the compiler.
    pub tags: Option<String>,
    /// Linker flags passed through to the compiler.
    pub ldflags: Option<String>,
    /// Whether cgo is enabled for the build.
    pub cgo: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            os: None,
            arch: None,
            output: None,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            tags: None,
            ldflags: None,
            cgo: false,
        }
    }
}

/// A fully resolved, validated build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    target: TargetPlatform,
    output: PathBuf,
    tags: Option<String>,
    ldflags: Option<String>,
    cgo: bool,
}

impl BuildRequest {
    /// Apply host defaults, validate the target, and compute the output path.
    ///
    /// Performs no I/O.
    pub fn resolve(
        options: &BuildOptions,
        host: &HostPlatform,
        table: &PlatformTable,
    ) -> gbuild_targets::Result<Self> {
        let os = non_empty(options.os.as_deref()).unwrap_or(&host.os);
        let arch = non_empty(options.arch.as_deref()).unwrap_or(&host.arch);
        let target = table.validate(os, arch)?;

        let output = match options
            .output
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
        {
            Some(explicit) => clean_path(explicit),
            None => clean_path(&options.out_dir.join(target.artifact_name())),
        };

        Ok(Self {
            target,
            output,
            tags: non_empty(options.tags.as_deref()).map(str::to_string),
            ldflags: non_empty(options.ldflags.as_deref()).map(str::to_string),
            cgo: options.cgo,
        })
    }

    /// The validated target platform.
    pub fn target(&self) -> &TargetPlatform {
        &self.target
    }

    /// Where the compiled binary is written.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Build tags, if any.
    pub fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    /// Linker flags, if any.
    pub fn ldflags(&self) -> Option<&str> {
        self.ldflags.as_deref()
    }

    /// Whether cgo is enabled.
    pub fn cgo(&self) -> bool {
        self.cgo
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Lexically normalize a path.
///
/// Drops `.` segments and repeated separators, and resolves `..` against a
/// preceding normal segment. A `..` directly after the root is dropped; a
/// leading `..` in a relative path is kept. An empty result becomes `.`.
/// The filesystem is never consulted, so symlinks are not followed.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_host() -> HostPlatform {
        HostPlatform {
            os: "linux".into(),
            arch: "amd64".into(),
        }
    }

    fn resolve(options: &BuildOptions) -> gbuild_targets::Result<BuildRequest> {
        BuildRequest::resolve(options, &linux_host(), &PlatformTable::builtin())
    }

    #[test]
    fn defaults_come_from_host() {
        let request = resolve(&BuildOptions::default()).unwrap();
        assert_eq!(request.target().os(), "linux");
        assert_eq!(request.target().arch(), "amd64");
        assert_eq!(request.output(), Path::new("bin/build-linux-amd64"));
        assert!(!request.cgo());
    }

    #[test]
    fn empty_strings_count_as_unset() {
        let options = BuildOptions {
            os: Some(String::new()),
            arch: Some(String::new()),
            output: Some(PathBuf::new()),
            tags: Some(String::new()),
            ldflags: Some(String::new()),
            ..BuildOptions::default()
        };
        let request = resolve(&options).unwrap();
        assert_eq!(request.target().os(), "linux");
        assert_eq!(request.output(), Path::new("bin/build-linux-amd64"));
        assert_eq!(request.tags(), None);
        assert_eq!(request.ldflags(), None);
    }

    #[test]
    fn only_arch_given_uses_host_os() {
        let options = BuildOptions {
            arch: Some("arm64".into()),
            ..BuildOptions::default()
        };
        let request = resolve(&options).unwrap();
        assert_eq!(request.target().to_string(), "linux/arm64");
    }

    #[test]
    fn windows_gets_exe_suffix() {
        let options = BuildOptions {
            os: Some("windows".into()),
            arch: Some("arm64".into()),
            ..BuildOptions::default()
        };
        let request = resolve(&options).unwrap();
        assert_eq!(request.output(), Path::new("bin/build-windows-arm64.exe"));
    }

    #[test]
    fn default_name_for_every_supported_pair() {
        let table = PlatformTable::builtin();
        for (os, arches) in table.iter() {
            for arch in arches {
                let options = BuildOptions {
                    os: Some(os.to_string()),
                    arch: Some(arch.to_string()),
                    ..BuildOptions::default()
                };
                let request = resolve(&options).unwrap();
                let mut expected = format!("build-{os}-{arch}");
                if os == "windows" {
                    expected.push_str(".exe");
                }
                assert_eq!(request.output().file_name().unwrap(), expected.as_str());
            }
        }
    }

    #[test]
    fn custom_out_dir_is_cleaned() {
        let options = BuildOptions {
            out_dir: PathBuf::from("./dist//"),
            ..BuildOptions::default()
        };
        let request = resolve(&options).unwrap();
        assert_eq!(request.output(), Path::new("dist/build-linux-amd64"));
    }

    #[test]
    fn explicit_output_is_cleaned() {
        let options = BuildOptions {
            output: Some(PathBuf::from("./out//app")),
            ..BuildOptions::default()
        };
        let request = resolve(&options).unwrap();
        assert_eq!(request.output(), Path::new("out/app"));
    }

    #[test]
    fn unsupported_host_os_fails() {
        let host = HostPlatform {
            os: "freebsd".into(),
            arch: "amd64".into(),
        };
        let err = BuildRequest::resolve(&BuildOptions::default(), &host, &PlatformTable::builtin())
            .unwrap_err();
        assert!(err.to_string().contains("unsupported OS: freebsd"));
    }

    #[test]
    fn unsupported_arch_fails() {
        let options = BuildOptions {
            os: Some("darwin".into()),
            arch: Some("386".into()),
            ..BuildOptions::default()
        };
        let err = resolve(&options).unwrap_err();
        assert!(err.to_string().starts_with("unsupported architecture"));
    }

    #[test]
    fn passthrough_strings_kept_verbatim() {
        let options = BuildOptions {
            tags: Some("netgo osusergo".into()),
            ldflags: Some("-s -w -X main.version=1.2.3".into()),
            cgo: true,
            ..BuildOptions::default()
        };
        let request = resolve(&options).unwrap();
        assert_eq!(request.tags(), Some("netgo osusergo"));
        assert_eq!(request.ldflags(), Some("-s -w -X main.version=1.2.3"));
        assert!(request.cgo());
    }

    #[test]
    fn clean_path_cases() {
        let cases = [
            ("./out//app", "out/app"),
            ("out/./app", "out/app"),
            ("a/b/../c", "a/c"),
            ("a/..", "."),
            ("a/../..", ".."),
            ("../a", "../a"),
            ("", "."),
            (".", "."),
            ("app", "app"),
            ("out/", "out"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_path(Path::new(input)), Path::new(expected), "{input:?}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn clean_path_absolute() {
        assert_eq!(clean_path(Path::new("/../tmp//x/.")), Path::new("/tmp/x"));
        assert_eq!(clean_path(Path::new("/")), Path::new("/"));
    }
}
