//! gbuild — cross-compile a Go program for a chosen OS and architecture.

mod commands;
mod config;

use std::ffi::OsString;
use std::fmt::Write as _;
use std::path::Path;
use std::process;

use clap::builder::BoolishValueParser;
use clap::{CommandFactory, FromArgMatches, Parser};
use gbuild_invoke::BuildError;
use gbuild_targets::{HostPlatform, PlatformTable, TargetError};

use commands::build::{BuildFlags, BuildPlan};
use config::GbuildConfig;

/// Long flags that may be spelled with a single dash, as in `-os linux`.
const LONG_FLAGS: &[&str] = &[
    "os", "arch", "output", "tags", "ldflags", "version", "hash", "cgo", "help",
];

/// Flags whose value may follow as a separate argument.
const VALUE_FLAGS: &[&str] = &["os", "arch", "o", "output", "tags", "ldflags"];

#[derive(Parser, Debug)]
#[command(
    name = "gbuild",
    about = "Cross-platform builder for Go programs",
    disable_version_flag = true
)]
struct Cli {
    #[command(flatten)]
    build: BuildFlags,

    /// Show version information
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
    )]
    version: Option<bool>,
}

fn main() {
    init_logging();

    let cli = parse_cli(std::env::args_os()).unwrap_or_else(|e| e.exit());
    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| run(cli, &cwd));
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(exit_code(&e));
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("GBUILD_LOG", "warn"))
        .format_timestamp(None)
        .init();
}

fn parse_cli<I>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = OsString>,
{
    let matches = Cli::command()
        .after_help(platforms_help(&PlatformTable::builtin()))
        .try_get_matches_from(normalize_args(args))?;
    Cli::from_arg_matches(&matches)
}

fn run(cli: Cli, cwd: &Path) -> anyhow::Result<()> {
    if cli.version.unwrap_or(false) {
        commands::version::run();
        return Ok(());
    }

    let config = GbuildConfig::find_and_load(cwd)?;
    let plan = BuildPlan::merge(&cli.build, config.as_ref());
    commands::build::run(&plan, &HostPlatform::detect())?;
    Ok(())
}

/// Map a fatal error to the process exit code.
///
/// Unsupported targets are usage errors (2). A failed compiler passes its
/// own exit code through. Everything else exits with 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<TargetError>().is_some() {
        return 2;
    }
    if let Some(build) = err.downcast_ref::<BuildError>() {
        return build
            .compiler_exit_code()
            .filter(|code| *code != 0)
            .unwrap_or(1);
    }
    1
}

/// Rewrite `-flag` spellings of long flags to `--flag`.
///
/// Values following a value-taking flag are left alone, so
/// `-ldflags -version` passes `-version` through as linker flags. Nothing
/// after `--` is touched.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut value_pending = false;
    let mut verbatim = false;

    for arg in args {
        if verbatim || value_pending {
            value_pending = false;
            normalized.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            verbatim = true;
            normalized.push(arg);
            continue;
        }
        let Some(flag) = text.strip_prefix("--").or_else(|| text.strip_prefix('-')) else {
            normalized.push(arg);
            continue;
        };

        let (name, inline_value) = match flag.split_once('=') {
            Some((name, _)) => (name, true),
            None => (flag, false),
        };
        value_pending = VALUE_FLAGS.contains(&name) && !inline_value;

        if !text.starts_with("--") && LONG_FLAGS.contains(&name) {
            normalized.push(format!("-{text}").into());
        } else {
            normalized.push(arg);
        }
    }
    normalized
}

/// Supported-platform listing and examples shown after `-help`.
fn platforms_help(table: &PlatformTable) -> String {
    let mut help = String::from("Supported platforms:\n");
    for (os, arches) in table.iter() {
        let _ = writeln!(help, "  {os:<7} → {}", arches.join(", "));
    }
    help.push_str(
        "\nExamples:\n  \
         gbuild -os linux -arch amd64\n  \
         gbuild -os windows -arch arm64 -o app.exe -cgo\n  \
         gbuild -version",
    );
    help
}
