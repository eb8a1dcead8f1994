//! Toolchain selection per platform.
//!
//! Each supported `(host_os, arch)` pair maps to a fixed recipe of CMake
//! toolchain arguments:
//! - Windows: `clang-cl` with an explicit MSVC target triple
//! - Linux arm64: a GNU cross toolchain
//! - Linux x64: a pinned clang if the host has one, plain clang otherwise
//!
//! Probing the host for compilers goes through `ToolchainLocator`, so the
//! resolver stays a pure function of its inputs.

use std::path::PathBuf;

use crate::builder::plan::{PlanNotice, PlanSettings};
use crate::core::target::Platform;
use crate::util::process::find_executable;

mod linux;
mod windows;

pub use linux::{select_native_clang, CompilerPair};
pub use windows::msvc_target_triple;

/// Answers "is this program available?" for compiler discovery.
pub trait ToolchainLocator {
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Looks programs up on the executing host's PATH.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocator;

impl ToolchainLocator for SystemLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        find_executable(program)
    }
}

/// Result of toolchain selection for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainSelection {
    pub args: Vec<String>,
    pub notice: Option<PlanNotice>,
}

/// Pick compilers, target triples and linker flags for `platform`.
pub fn select_toolchain(
    platform: Platform,
    settings: &PlanSettings,
    locator: &dyn ToolchainLocator,
) -> ToolchainSelection {
    match platform {
        Platform::WindowsX64 | Platform::WindowsArm64 => ToolchainSelection {
            args: windows::clang_cl_args(platform.arch()),
            notice: None,
        },
        Platform::LinuxArm64 => ToolchainSelection {
            args: linux::aarch64_cross_args(),
            notice: None,
        },
        Platform::LinuxX64 => {
            let pair = select_native_clang(settings.pinned_clang, locator);
            ToolchainSelection {
                args: pair.cmake_args(),
                notice: Some(pair.notice()),
            }
        }
    }
}
