//! High-level operations.
//!
//! This module contains the implementation of the `cxxprebuilt` commands.

pub mod build_variant;
pub mod package_variant;
pub mod verify;

pub use build_variant::{build_variant, emit_notices, plan_variant, BuildOptions};
pub use package_variant::{package, package_variant, PackageArtifacts};
pub use verify::{checksum_path, verify_package};
