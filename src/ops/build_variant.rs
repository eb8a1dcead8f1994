//! Configure, build and install one variant.

use std::path::{Path, PathBuf};

use crate::builder::plan::{PlanSettings, ToolchainPlan};
use crate::builder::resolve::Resolver;
use crate::builder::toolchain::ToolchainLocator;
use crate::builder::BuildExecutor;
use crate::core::layout::OutputLayout;
use crate::core::target::BuildTarget;
use crate::util::errors::{Error, Result};
use crate::util::shell::{Shell, Status};

/// Options for building a variant.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// LLVM monorepo checkout
    pub llvm_src: PathBuf,
    /// Root of the build/install/packages layout
    pub out_root: PathBuf,
    /// The variant to build
    pub target: BuildTarget,
    /// Generator, jobs and compiler pinning
    pub settings: PlanSettings,
}

/// Resolve the plan for `opts` without touching the filesystem.
pub fn plan_variant(opts: &BuildOptions, locator: &dyn ToolchainLocator) -> Result<ToolchainPlan> {
    check_llvm_src(&opts.llvm_src)?;
    let layout = OutputLayout::absolute(&opts.out_root)?;

    let plan = Resolver::new(&opts.llvm_src, &layout, locator)
        .with_settings(opts.settings.clone())
        .resolve(&opts.target);

    Ok(plan)
}

/// Resolve, then configure, build and install the variant.
pub fn build_variant(
    opts: &BuildOptions,
    locator: &dyn ToolchainLocator,
    shell: &Shell,
) -> Result<ToolchainPlan> {
    shell.status(Status::Resolving, opts.target.key());
    let plan = plan_variant(opts, locator)?;
    emit_notices(&plan, shell);

    BuildExecutor::new(shell).execute(&plan)?;

    shell.status(
        Status::Finished,
        format!("{} -> {}", plan.variant, plan.install_dir.display()),
    );
    Ok(plan)
}

/// Print the resolver's decisions: warnings as warnings, the rest as info.
pub fn emit_notices(plan: &ToolchainPlan, shell: &Shell) {
    for notice in &plan.notices {
        tracing::debug!("plan notice: {:?}", notice);
        if notice.is_warning() {
            shell.warn(notice);
        } else {
            shell.status(Status::Toolchain, notice);
        }
    }
}

/// The LLVM checkout must contain the `runtimes/` entry point.
fn check_llvm_src(llvm_src: &Path) -> Result<()> {
    if llvm_src.join("runtimes").is_dir() {
        Ok(())
    } else {
        Err(Error::invalid(
            "LLVM source root",
            llvm_src.display().to_string(),
            "a directory containing `runtimes/`",
        ))
    }
}
