//! `cxxprebuilt package` command

use anyhow::Result;

use super::variant_key;
use crate::cli::PackageArgs;
use cxxprebuilt::core::VariantIdentity;
use cxxprebuilt::ops::package_variant;
use cxxprebuilt::util::Shell;

pub fn execute(args: PackageArgs, shell: &Shell) -> Result<()> {
    let key = variant_key(&args.target)?;
    let identity = VariantIdentity::new(key, args.llvm_tag, args.target.abi_namespace)?;

    let artifacts = package_variant(&args.out_root, &identity, shell)?;

    tracing::debug!(
        "packaged {} file(s) into {}",
        artifacts.entries,
        artifacts.archive.display()
    );
    println!("{}", artifacts.archive.display());
    println!("{}", artifacts.checksum.display());
    println!("{}", artifacts.manifest.display());

    Ok(())
}
