//! Windows toolchain: clang-cl targeting the MSVC ABI.

use crate::builder::cmake::define;
use crate::core::target::Arch;

const CLANG_CL: &str = "clang-cl";

/// Linker flag cache entries that get `/INCREMENTAL:NO`.
const LINKER_FLAG_VARS: [&str; 3] = [
    "CMAKE_EXE_LINKER_FLAGS",
    "CMAKE_SHARED_LINKER_FLAGS",
    "CMAKE_MODULE_LINKER_FLAGS",
];

pub const fn msvc_target_triple(arch: Arch) -> &'static str {
    match arch {
        Arch::X64 => "x86_64-pc-windows-msvc",
        Arch::Arm64 => "aarch64-pc-windows-msvc",
    }
}

pub(super) fn clang_cl_args(arch: Arch) -> Vec<String> {
    let triple = msvc_target_triple(arch);

    let mut args = vec![
        define("CMAKE_C_COMPILER", CLANG_CL),
        define("CMAKE_CXX_COMPILER", CLANG_CL),
        define("CMAKE_C_COMPILER_TARGET", triple),
        define("CMAKE_CXX_COMPILER_TARGET", triple),
    ];

    // Incremental linking pads images and embeds state; keep outputs stable.
    args.extend(
        LINKER_FLAG_VARS
            .iter()
            .map(|var| define(var, "/INCREMENTAL:NO")),
    );

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_table() {
        assert_eq!(msvc_target_triple(Arch::X64), "x86_64-pc-windows-msvc");
        assert_eq!(msvc_target_triple(Arch::Arm64), "aarch64-pc-windows-msvc");
    }

    #[test]
    fn test_clang_cl_args() {
        let args = clang_cl_args(Arch::Arm64);
        assert!(args.contains(&"-DCMAKE_CXX_COMPILER=clang-cl".to_string()));
        assert!(args.contains(&"-DCMAKE_CXX_COMPILER_TARGET=aarch64-pc-windows-msvc".to_string()));
        assert!(args.contains(&"-DCMAKE_EXE_LINKER_FLAGS=/INCREMENTAL:NO".to_string()));
        assert_eq!(
            args.iter().filter(|a| a.ends_with("/INCREMENTAL:NO")).count(),
            3
        );
    }
}
