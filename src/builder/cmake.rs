//! CMake command construction.
//!
//! Two invocations drive a variant: a configure step that materializes the
//! build graph from the plan, and `cmake --build --target install`.

use crate::builder::plan::ToolchainPlan;
use crate::util::process::ProcessBuilder;

/// A `-D<name>=<value>` cache entry.
pub fn define(name: &str, value: impl AsRef<str>) -> String {
    format!("-D{}={}", name, value.as_ref())
}

/// A `-D<name>=ON|OFF` cache entry.
pub fn switch(name: &str, enabled: bool) -> String {
    define(name, if enabled { "ON" } else { "OFF" })
}

/// The configure invocation for `plan`.
pub fn configure_command(plan: &ToolchainPlan) -> ProcessBuilder {
    ProcessBuilder::new(&plan.cmake).args(plan.configure_args())
}

/// The build-and-install invocation for `plan`.
pub fn install_command(plan: &ToolchainPlan) -> ProcessBuilder {
    ProcessBuilder::new(&plan.cmake).args(plan.build_args())
}
