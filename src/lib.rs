//! cxxprebuilt - prebuilt static libc++ variants
//!
//! This crate resolves a libc++ variant (host OS, architecture, build
//! configuration, ABI namespace and feature switches) into a CMake plan,
//! runs that plan against an LLVM checkout, and packages the installed tree
//! as a zip archive with checksum and manifest sidecars.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test doubles for unit tests: a fake toolchain locator, a stand-in
/// `cmake` script and small filesystem fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::builder::{PlanSettings, ToolchainPlan};
pub use crate::core::{BuildTarget, VariantIdentity, VariantKey};
pub use crate::util::errors::{Error, Result};
