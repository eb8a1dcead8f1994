//! Linux toolchains.

use crate::builder::cmake::define;
use crate::builder::plan::PlanNotice;

use super::ToolchainLocator;

/// Cross toolchain for aarch64 hosts built from an x86_64 machine.
///
/// Test binaries cannot run on the build host, so CMake's try-compile checks
/// are limited to static libraries.
pub(super) fn aarch64_cross_args() -> Vec<String> {
    vec![
        define("CMAKE_SYSTEM_NAME", "Linux"),
        define("CMAKE_SYSTEM_PROCESSOR", "aarch64"),
        define("CMAKE_C_COMPILER", "aarch64-linux-gnu-gcc"),
        define("CMAKE_CXX_COMPILER", "aarch64-linux-gnu-g++"),
        define("CMAKE_TRY_COMPILE_TARGET_TYPE", "STATIC_LIBRARY"),
    ]
}

/// The C and C++ compiler names chosen for a native build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerPair {
    pub c: String,
    pub cxx: String,
}

impl CompilerPair {
    pub fn cmake_args(&self) -> Vec<String> {
        vec![
            define("CMAKE_C_COMPILER", &self.c),
            define("CMAKE_CXX_COMPILER", &self.cxx),
        ]
    }

    pub fn notice(&self) -> PlanNotice {
        PlanNotice::CompilerSelected {
            c: self.c.clone(),
            cxx: self.cxx.clone(),
        }
    }
}

/// Prefer `clang-<major>` / `clang++-<major>`, each independently falling
/// back to the unversioned name.
pub fn select_native_clang(pinned_major: u32, locator: &dyn ToolchainLocator) -> CompilerPair {
    CompilerPair {
        c: pick(&format!("clang-{}", pinned_major), "clang", locator),
        cxx: pick(&format!("clang++-{}", pinned_major), "clang++", locator),
    }
}

fn pick(pinned: &str, fallback: &str, locator: &dyn ToolchainLocator) -> String {
    match locator.locate(pinned) {
        Some(path) => {
            tracing::debug!("found pinned compiler {} at {}", pinned, path.display());
            pinned.to_string()
        }
        None => {
            tracing::debug!("{} not found, falling back to {}", pinned, fallback);
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeLocator;

    #[test]
    fn test_pinned_compilers_preferred() {
        let locator = FakeLocator::with(&["clang-20", "clang++-20", "clang", "clang++"]);
        let pair = select_native_clang(20, &locator);
        assert_eq!(pair.c, "clang-20");
        assert_eq!(pair.cxx, "clang++-20");
    }

    #[test]
    fn test_fallback_when_pinned_missing() {
        let pair = select_native_clang(20, &FakeLocator::empty());
        assert_eq!(pair.c, "clang");
        assert_eq!(pair.cxx, "clang++");
    }

    #[test]
    fn test_each_compiler_falls_back_independently() {
        let locator = FakeLocator::with(&["clang-20"]);
        let pair = select_native_clang(20, &locator);
        assert_eq!(pair.c, "clang-20");
        assert_eq!(pair.cxx, "clang++");
    }

    #[test]
    fn test_pinned_major_is_configurable() {
        let locator = FakeLocator::with(&["clang-19", "clang++-19"]);
        assert_eq!(select_native_clang(19, &locator).c, "clang-19");
        assert_eq!(select_native_clang(20, &locator).c, "clang");
    }

    #[test]
    fn test_cross_args() {
        let args = aarch64_cross_args();
        assert!(args.contains(&"-DCMAKE_SYSTEM_PROCESSOR=aarch64".to_string()));
        assert!(args.contains(&"-DCMAKE_TRY_COMPILE_TARGET_TYPE=STATIC_LIBRARY".to_string()));
        assert!(args.contains(&"-DCMAKE_CXX_COMPILER=aarch64-linux-gnu-g++".to_string()));
    }
}
