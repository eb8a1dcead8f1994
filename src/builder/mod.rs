//! Variant build pipeline.
//!
//! Resolution turns a `BuildTarget` into a `ToolchainPlan`; the executor then
//! drives CMake through that plan.

pub mod cmake;
pub mod executor;
pub mod plan;
pub mod resolve;
pub mod toolchain;

pub use executor::BuildExecutor;
pub use plan::{PlanNotice, PlanSettings, RuntimeComponent, ToolchainPlan};
pub use resolve::Resolver;
pub use toolchain::{SystemLocator, ToolchainLocator};
