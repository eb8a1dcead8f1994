//! `cxxprebuilt verify` command

use anyhow::Result;

use crate::cli::VerifyArgs;
use cxxprebuilt::ops::verify_package;
use cxxprebuilt::util::shell::{Shell, Status};

pub fn execute(args: VerifyArgs, shell: &Shell) -> Result<()> {
    let digest = verify_package(&args.archive)?;
    shell.status(Status::Verified, args.archive.display());
    println!("{}", digest);
    Ok(())
}
