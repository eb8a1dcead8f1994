//! `cxxprebuilt build` command

use anyhow::Result;

use super::{plan_settings, variant_key};
use crate::cli::BuildArgs;
use cxxprebuilt::builder::SystemLocator;
use cxxprebuilt::core::flag::parse_switch;
use cxxprebuilt::core::{BuildTarget, FeatureFlags};
use cxxprebuilt::ops::{build_variant, BuildOptions};
use cxxprebuilt::util::Shell;

pub fn execute(args: BuildArgs, shell: &Shell) -> Result<()> {
    let opts = build_options(args)?;
    build_variant(&opts, &SystemLocator, shell)?;
    Ok(())
}

/// Normalize the string switches and assemble the build request.
pub fn build_options(args: BuildArgs) -> Result<BuildOptions> {
    let key = variant_key(&args.target)?;

    let features = FeatureFlags {
        iterator_debugging: parse_switch(
            "--enable-iterator-debugging",
            &args.enable_iterator_debugging,
        )?,
        asan_instrumented: args.instrumented_with_asan,
        tzdb_requested: parse_switch("--enable-tzdb", &args.enable_tzdb)?,
    };

    let target = BuildTarget::new(key, args.target.abi_namespace)?.with_features(features);

    Ok(BuildOptions {
        llvm_src: args.llvm_src,
        out_root: args.out_root,
        target,
        settings: plan_settings()?,
    })
}
