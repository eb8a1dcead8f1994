//! Configuration resolver.
//!
//! Maps a validated `BuildTarget` to a `ToolchainPlan`. Resolution is a pure
//! function of the target, the `PlanSettings` and the locator's answers: it
//! creates nothing and runs nothing, so calling it twice yields equal plans.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::builder::cmake::{define, switch};
use crate::builder::plan::{
    PlanNotice, PlanSettings, RuntimeComponent, ToolchainPlan, FLAG_ITERATOR_DEBUGGING, FLAG_TZDB,
};
use crate::builder::toolchain::{select_toolchain, ToolchainLocator};
use crate::core::layout::OutputLayout;
use crate::core::target::{BuildTarget, FeatureFlags, HostOs};

/// Resolves build targets against one LLVM checkout and output root.
pub struct Resolver<'a> {
    llvm_src: PathBuf,
    layout: &'a OutputLayout,
    settings: PlanSettings,
    locator: &'a dyn ToolchainLocator,
}

impl<'a> Resolver<'a> {
    pub fn new(
        llvm_src: impl Into<PathBuf>,
        layout: &'a OutputLayout,
        locator: &'a dyn ToolchainLocator,
    ) -> Self {
        Resolver {
            llvm_src: llvm_src.into(),
            layout,
            settings: PlanSettings::default(),
            locator,
        }
    }

    /// Override generator, job count, CMake path or pinned compiler.
    pub fn with_settings(mut self, settings: PlanSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &PlanSettings {
        &self.settings
    }

    pub fn resolve(&self, target: &BuildTarget) -> ToolchainPlan {
        let key = target.key();
        let build_dir = self.layout.build_dir(&key);
        let install_dir = self.layout.install_dir(&key);

        let runtime_components = runtime_components(target.host_os());
        let features = resolve_features(target.host_os(), target.features());
        let compiler_defines = compiler_defines(target.features());

        let mut notices: Vec<PlanNotice> = features.notice.into_iter().collect();

        let toolchain = select_toolchain(target.platform(), &self.settings, self.locator);
        notices.extend(toolchain.notice);

        let cache_args = cache_args(&CacheInputs {
            target,
            install_dir: &install_dir,
            components: &runtime_components,
            tzdb: features.tzdb,
            defines: &compiler_defines,
        });

        let mut effective_feature_flags = BTreeMap::new();
        effective_feature_flags.insert(FLAG_ITERATOR_DEBUGGING.to_string(), features.iterator_debugging);
        effective_feature_flags.insert(FLAG_TZDB.to_string(), features.tzdb);

        tracing::debug!(
            "resolved {} with runtimes {:?}",
            key,
            runtime_components
        );

        ToolchainPlan {
            variant: key,
            cmake: self.settings.cmake.clone(),
            generator: self.settings.generator.clone(),
            jobs: self.settings.jobs,
            source_dir: self.llvm_src.join("runtimes"),
            build_dir,
            install_dir,
            runtime_components,
            compiler_defines,
            cache_args,
            toolchain_args: toolchain.args,
            effective_feature_flags,
            notices,
        }
    }
}

/// `libcxx` everywhere; `libcxxabi` and `libunwind` only off Windows, where
/// the unwinder/ABI libraries are not supported.
pub fn runtime_components(host_os: HostOs) -> Vec<RuntimeComponent> {
    let mut components = vec![RuntimeComponent::Libcxx];
    match host_os {
        HostOs::Windows => {}
        HostOs::Linux => {
            components.push(RuntimeComponent::Libcxxabi);
            components.push(RuntimeComponent::Libunwind);
        }
    }
    components
}

/// Whether libc++'s time zone database can be built for `host_os`.
pub fn supports_tzdb(host_os: HostOs) -> bool {
    match host_os {
        HostOs::Windows => false,
        HostOs::Linux => true,
    }
}

struct ResolvedFeatures {
    iterator_debugging: bool,
    tzdb: bool,
    notice: Option<PlanNotice>,
}

fn resolve_features(host_os: HostOs, requested: &FeatureFlags) -> ResolvedFeatures {
    let tzdb = requested.tzdb_requested && supports_tzdb(host_os);

    // Never drop a requested feature silently.
    let notice = (requested.tzdb_requested && !tzdb)
        .then_some(PlanNotice::TzdbUnsupported { host_os });

    ResolvedFeatures {
        iterator_debugging: requested.iterator_debugging,
        tzdb,
        notice,
    }
}

fn compiler_defines(features: &FeatureFlags) -> Vec<String> {
    let mut defines = vec![format!(
        "-D_LIBCPP_INSTRUMENTED_WITH_ASAN={}",
        features.asan_instrumented
    )];

    if features.iterator_debugging {
        defines.push("-D_LIBCPP_ENABLE_DEBUG_MODE".to_string());
    }

    defines
}

struct CacheInputs<'a> {
    target: &'a BuildTarget,
    install_dir: &'a Path,
    components: &'a [RuntimeComponent],
    tzdb: bool,
    defines: &'a [String],
}

fn cache_args(inputs: &CacheInputs<'_>) -> Vec<String> {
    let runtimes = inputs
        .components
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let mut args = vec![
        define("CMAKE_BUILD_TYPE", inputs.target.config().as_str()),
        define("CMAKE_INSTALL_PREFIX", inputs.install_dir.display().to_string()),
        define("LLVM_ENABLE_RUNTIMES", runtimes),
    ];

    for component in inputs.components {
        args.extend(static_only_args(*component));
    }

    args.push(define("LIBCXX_ABI_NAMESPACE", inputs.target.abi_namespace()));
    args.push(switch("LIBCXX_ENABLE_TIME_ZONE_DATABASE", inputs.tzdb));
    args.push(define("CMAKE_CXX_FLAGS", inputs.defines.join(" ")));

    args
}

/// Static libraries only, tests off.
fn static_only_args(component: RuntimeComponent) -> Vec<String> {
    match component {
        RuntimeComponent::Libcxx => vec![
            switch("LIBCXX_ENABLE_SHARED", false),
            switch("LIBCXX_ENABLE_STATIC", true),
            switch("LIBCXX_INCLUDE_TESTS", false),
            switch("LIBCXX_INCLUDE_BENCHMARKS", false),
        ],
        RuntimeComponent::Libcxxabi => vec![
            switch("LIBCXXABI_ENABLE_SHARED", false),
            switch("LIBCXXABI_ENABLE_STATIC", true),
            switch("LIBCXXABI_INCLUDE_TESTS", false),
        ],
        RuntimeComponent::Libunwind => vec![
            switch("LIBUNWIND_ENABLE_SHARED", false),
            switch("LIBUNWIND_ENABLE_STATIC", true),
            switch("LIBUNWIND_INCLUDE_TESTS", false),
        ],
    }
}
