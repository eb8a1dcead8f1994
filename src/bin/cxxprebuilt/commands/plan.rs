//! `cxxprebuilt plan` command
//!
//! Prints what `build` would run for the same options. Nothing is created
//! and no process is started.

use anyhow::Result;

use super::build::build_options;
use crate::cli::PlanArgs;
use cxxprebuilt::builder::cmake::{configure_command, install_command};
use cxxprebuilt::builder::{SystemLocator, ToolchainPlan};
use cxxprebuilt::ops::{emit_notices, plan_variant};
use cxxprebuilt::util::Shell;

pub fn execute(args: PlanArgs, shell: &Shell) -> Result<()> {
    let opts = build_options(args.build)?;
    let plan = plan_variant(&opts, &SystemLocator)?;
    emit_notices(&plan, shell);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    Ok(())
}

fn print_plan(plan: &ToolchainPlan) {
    println!("variant:   {}", plan.variant);
    println!("source:    {}", plan.source_dir.display());
    println!("build:     {}", plan.build_dir.display());
    println!("install:   {}", plan.install_dir.display());
    println!("runtimes:  {}", plan.runtimes_list());

    let flags: Vec<String> = plan
        .effective_feature_flags
        .iter()
        .map(|(name, on)| format!("{}={}", name, on))
        .collect();
    println!("features:  {}", flags.join(" "));

    if !plan.compiler_defines.is_empty() {
        println!("defines:   {}", plan.compiler_defines.join(" "));
    }

    println!();
    println!("{}", configure_command(plan).display_command());
    println!("{}", install_command(plan).display_command());
}
