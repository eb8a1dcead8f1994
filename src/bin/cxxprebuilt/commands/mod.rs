//! Command implementations

pub mod build;
pub mod completions;
pub mod package;
pub mod plan;
pub mod verify;

use anyhow::{Context, Result};

use crate::cli::TargetArgs;
use cxxprebuilt::builder::PlanSettings;
use cxxprebuilt::core::{Arch, Configuration, HostOs, VariantKey};
use cxxprebuilt::util::config::{global_config_path, load_config, project_config_path};

/// Parse the closed-domain target options.
pub fn variant_key(args: &TargetArgs) -> Result<VariantKey> {
    let host_os: HostOs = args.host_os.parse()?;
    let arch: Arch = args.arch.parse()?;
    let config: Configuration = args.config.parse()?;

    Ok(VariantKey::new(host_os, arch, config))
}

/// Plan settings from the global and project config files.
pub fn plan_settings() -> Result<PlanSettings> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let config = load_config(global_config_path().as_deref(), &project_config_path(&cwd));

    Ok(config.plan_settings())
}
