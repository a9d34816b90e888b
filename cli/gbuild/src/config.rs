//! `gbuild.toml` project configuration.
//!
//! Every key is optional and only supplies a default; command-line flags
//! always win.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File name searched for from the working directory upward.
pub const CONFIG_FILE: &str = "gbuild.toml";

/// Marks the root of a Go module; the search does not go above it.
const MODULE_FILE: &str = "go.mod";

/// The top-level configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GbuildConfig {
    /// Build defaults.
    #[serde(default)]
    pub build: BuildConfig,
    /// Compiler selection.
    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

/// `[build]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BuildConfig {
    /// Default target OS.
    #[serde(default)]
    pub os: Option<String>,
    /// Default target architecture.
    #[serde(default)]
    pub arch: Option<String>,
    /// Output directory, relative to the directory holding `gbuild.toml`.
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    /// Default build tags.
    #[serde(default)]
    pub tags: Option<String>,
    /// Default linker flags.
    #[serde(default)]
    pub ldflags: Option<String>,
    /// Enable cgo unless overridden.
    #[serde(default)]
    pub cgo: Option<bool>,
    /// Print the artifact digest unless overridden.
    #[serde(default)]
    pub hash: Option<bool>,
}

/// `[toolchain]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToolchainConfig {
    /// Compiler program; defaults to `go`.
    #[serde(default)]
    pub program: Option<String>,
}

/// A configuration together with the directory it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    /// Parsed contents.
    pub config: GbuildConfig,
    /// Directory containing `gbuild.toml`.
    pub dir: PathBuf,
}

impl GbuildConfig {
    /// Search upward from `start_dir` for `gbuild.toml` and parse the first
    /// one found.
    ///
    /// The search stops at the first directory containing `go.mod`, after
    /// checking that directory itself.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<LoadedConfig>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config = Self::parse(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                log::info!("using config {}", candidate.display());
                return Ok(Some(LoadedConfig { config, dir }));
            }
            if dir.join(MODULE_FILE).is_file() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl LoadedConfig {
    /// The configured output directory, anchored at the config's directory.
    pub fn out_dir(&self) -> Option<PathBuf> {
        self.config
            .build
            .out_dir
            .as_ref()
            .map(|out_dir| self.dir.join(out_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = GbuildConfig::parse(
            r#"
[build]
os = "linux"
arch = "arm64"
out_dir = "dist"
tags = "netgo"
ldflags = "-s -w"
cgo = true
hash = true

[toolchain]
program = "/usr/local/go/bin/go"
"#,
        )
        .unwrap();
        assert_eq!(config.build.os.as_deref(), Some("linux"));
        assert_eq!(config.build.arch.as_deref(), Some("arm64"));
        assert_eq!(config.build.out_dir, Some(PathBuf::from("dist")));
        assert_eq!(config.build.tags.as_deref(), Some("netgo"));
        assert_eq!(config.build.ldflags.as_deref(), Some("-s -w"));
        assert_eq!(config.build.cgo, Some(true));
        assert_eq!(config.build.hash, Some(true));
        assert_eq!(
            config.toolchain.program.as_deref(),
            Some("/usr/local/go/bin/go")
        );
    }

    #[test]
    fn parse_empty_config() {
        let config = GbuildConfig::parse("").unwrap();
        assert_eq!(config, GbuildConfig::default());
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(GbuildConfig::parse("[build\nos = ").is_err());
        assert!(GbuildConfig::parse("[build]\ncgo = \"yes\"").is_err());
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[build]\nos = \"darwin\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let loaded = GbuildConfig::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(loaded.dir, dir.path());
        assert_eq!(loaded.config.build.os.as_deref(), Some("darwin"));
    }

    #[test]
    fn find_and_load_stops_at_module_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[build\n").unwrap();
        let module = dir.path().join("module");
        let nested = module.join("cmd").join("app");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(module.join(MODULE_FILE), "module example.com/app\n").unwrap();

        assert!(GbuildConfig::find_and_load(&nested).unwrap().is_none());
        assert!(GbuildConfig::find_and_load(&module).unwrap().is_none());
    }

    #[test]
    fn find_and_load_reads_config_beside_go_mod() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MODULE_FILE), "module example.com/app\n").unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[build]\narch = \"arm64\"\n").unwrap();
        let nested = dir.path().join("cmd");
        std::fs::create_dir_all(&nested).unwrap();

        let loaded = GbuildConfig::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(loaded.dir, dir.path());
        assert_eq!(loaded.config.build.arch.as_deref(), Some("arm64"));
    }

    #[test]
    fn find_and_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "not toml [[[").unwrap();
        let err = GbuildConfig::find_and_load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }

    #[test]
    fn out_dir_is_relative_to_config() {
        let loaded = LoadedConfig {
            config: GbuildConfig::parse("[build]\nout_dir = \"dist\"").unwrap(),
            dir: PathBuf::from("/work/project"),
        };
        assert_eq!(loaded.out_dir(), Some(PathBuf::from("/work/project/dist")));

        let loaded = LoadedConfig {
            config: GbuildConfig::default(),
            dir: PathBuf::from("/work/project"),
        };
        assert_eq!(loaded.out_dir(), None);
    }
}
