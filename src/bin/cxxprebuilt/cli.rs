//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use cxxprebuilt::util::shell::ColorChoice;

/// cxxprebuilt - build and package prebuilt static libc++ variants
#[derive(Parser)]
#[command(name = "cxxprebuilt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings, the toolchain choice and the command log
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure, build and install one libc++ variant
    Build(BuildArgs),

    /// Package an installed variant as a zip with checksum and manifest
    Package(PackageArgs),

    /// Show the resolved build plan without running anything
    Plan(PlanArgs),

    /// Check a packaged archive against its .sha256 file
    Verify(VerifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options that identify a variant.
#[derive(Args)]
pub struct TargetArgs {
    /// Host operating system: windows, linux
    #[arg(long, env = "CXXPREBUILT_HOST_OS")]
    pub host_os: String,

    /// Target architecture: x64, arm64
    #[arg(long, env = "CXXPREBUILT_ARCH")]
    pub arch: String,

    /// Build configuration: Debug, Release
    #[arg(long, env = "CXXPREBUILT_CONFIG")]
    pub config: String,

    /// Inline namespace for libc++ symbols
    #[arg(long, env = "CXXPREBUILT_ABI_NAMESPACE")]
    pub abi_namespace: String,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Root of the LLVM monorepo checkout
    #[arg(long, env = "CXXPREBUILT_LLVM_SRC")]
    pub llvm_src: PathBuf,

    /// Root for build/, install/ and packages/
    #[arg(long, env = "CXXPREBUILT_OUT_ROOT")]
    pub out_root: PathBuf,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Enable libc++ iterator debugging
    #[arg(
        long,
        value_name = "BOOL",
        env = "CXXPREBUILT_ENABLE_ITERATOR_DEBUGGING",
        default_value = "false"
    )]
    pub enable_iterator_debugging: String,

    /// ASan instrumentation marker, passed through to the compiler
    #[arg(
        long,
        value_name = "VALUE",
        env = "CXXPREBUILT_INSTRUMENTED_WITH_ASAN",
        default_value = "0"
    )]
    pub instrumented_with_asan: String,

    /// Request the time zone database (ignored on Windows)
    #[arg(
        long,
        value_name = "BOOL",
        env = "CXXPREBUILT_ENABLE_TZDB",
        default_value = "true"
    )]
    pub enable_tzdb: String,
}

#[derive(Args)]
pub struct PackageArgs {
    /// Root for build/, install/ and packages/
    #[arg(long, env = "CXXPREBUILT_OUT_ROOT")]
    pub out_root: PathBuf,

    #[command(flatten)]
    pub target: TargetArgs,

    /// LLVM release tag the variant was built from
    #[arg(long, env = "CXXPREBUILT_LLVM_TAG")]
    pub llvm_tag: String,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Path to the packaged .zip archive
    pub archive: PathBuf,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
