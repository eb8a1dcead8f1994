//! Toolchain plan.
//!
//! A `ToolchainPlan` is everything the executor needs to configure, build and
//! install one variant. It is fully materialized by the resolver; the
//! executor makes no decisions of its own.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::target::{HostOs, VariantKey};

/// Default worker count for `cmake --build`.
pub const DEFAULT_JOBS: usize = 4;

/// Default pinned clang major on Linux x64.
pub const DEFAULT_PINNED_CLANG: u32 = 20;

/// Feature flag names used in `effective_feature_flags`.
pub const FLAG_ITERATOR_DEBUGGING: &str = "iterator_debugging";
pub const FLAG_TZDB: &str = "tzdb";

/// A sub-library of the runtime stack.
///
/// Declaration order is the order CMake receives them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeComponent {
    Libcxx,
    Libcxxabi,
    Libunwind,
}

impl RuntimeComponent {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RuntimeComponent::Libcxx => "libcxx",
            RuntimeComponent::Libcxxabi => "libcxxabi",
            RuntimeComponent::Libunwind => "libunwind",
        }
    }
}

impl fmt::Display for RuntimeComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Knobs that are not part of the variant identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSettings {
    pub cmake: PathBuf,
    pub generator: String,
    pub jobs: usize,
    pub pinned_clang: u32,
}

impl Default for PlanSettings {
    fn default() -> Self {
        PlanSettings {
            cmake: PathBuf::from("cmake"),
            generator: "Ninja".to_string(),
            jobs: DEFAULT_JOBS,
            pinned_clang: DEFAULT_PINNED_CLANG,
        }
    }
}

/// Something the resolver decided that the user should see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanNotice {
    /// tzdb was requested on a platform that cannot support it.
    TzdbUnsupported { host_os: HostOs },
    /// Which compiler binaries were picked on Linux x64.
    CompilerSelected { c: String, cxx: String },
}

impl PlanNotice {
    pub fn is_warning(&self) -> bool {
        matches!(self, PlanNotice::TzdbUnsupported { .. })
    }
}

impl fmt::Display for PlanNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanNotice::TzdbUnsupported { host_os } => write!(
                f,
                "time zone database support is not available on {}; building without it",
                host_os
            ),
            PlanNotice::CompilerSelected { c, cxx } => {
                write!(f, "Using Linux x64 compilers: C={}, CXX={}", c, cxx)
            }
        }
    }
}

/// The resolved configuration of one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainPlan {
    pub variant: VariantKey,

    /// CMake executable
    pub cmake: PathBuf,
    /// `-G` value
    pub generator: String,
    /// Worker count for the build-and-install step
    pub jobs: usize,

    /// `<llvm-src>/runtimes`
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub install_dir: PathBuf,

    /// Enabled sub-libraries, in CMake order
    pub runtime_components: Vec<RuntimeComponent>,
    /// Preprocessor defines passed through `CMAKE_CXX_FLAGS`
    pub compiler_defines: Vec<String>,
    /// Runtime cache entries (build type, prefix, library switches)
    pub cache_args: Vec<String>,
    /// Compiler paths, target triples, linker flags
    pub toolchain_args: Vec<String>,
    /// Feature flags after platform overrides
    pub effective_feature_flags: BTreeMap<String, bool>,

    /// Decisions to surface to the user
    pub notices: Vec<PlanNotice>,
}

impl ToolchainPlan {
    /// `libcxx;libcxxabi;libunwind` style enablement string.
    pub fn runtimes_list(&self) -> String {
        self.runtime_components
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn has_component(&self, component: RuntimeComponent) -> bool {
        self.runtime_components.contains(&component)
    }

    pub fn effective_flag(&self, name: &str) -> Option<bool> {
        self.effective_feature_flags.get(name).copied()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &PlanNotice> {
        self.notices.iter().filter(|n| n.is_warning())
    }

    /// Full argument list of the configure invocation, in a stable order.
    pub fn configure_args(&self) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            self.source_dir.display().to_string(),
            "-B".to_string(),
            self.build_dir.display().to_string(),
            "-G".to_string(),
            self.generator.clone(),
        ];
        args.extend(self.cache_args.iter().cloned());
        args.extend(self.toolchain_args.iter().cloned());
        args
    }

    /// Argument list of the build-and-install invocation.
    pub fn build_args(&self) -> Vec<String> {
        vec![
            "--build".to_string(),
            self.build_dir.display().to_string(),
            "--target".to_string(),
            "install".to_string(),
            "-j".to_string(),
            self.jobs.to_string(),
        ]
    }
}
