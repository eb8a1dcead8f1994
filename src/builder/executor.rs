//! Build executor.
//!
//! Runs the two CMake invocations for a plan, strictly in order. The first
//! non-zero exit aborts the build; nothing is retried.

use crate::builder::cmake::{configure_command, install_command};
use crate::builder::plan::ToolchainPlan;
use crate::util::errors::Result;
use crate::util::fs::ensure_dir;
use crate::util::process::ProcessBuilder;
use crate::util::shell::{Shell, Status};

/// Drives the external generator and build tool for one plan.
pub struct BuildExecutor<'a> {
    shell: &'a Shell,
}

impl<'a> BuildExecutor<'a> {
    pub fn new(shell: &'a Shell) -> Self {
        BuildExecutor { shell }
    }

    /// Create the variant's directories, configure, then build and install.
    pub fn execute(&self, plan: &ToolchainPlan) -> Result<()> {
        ensure_dir(&plan.build_dir)?;
        ensure_dir(&plan.install_dir)?;

        self.run(Status::Configuring, configure_command(plan), plan)?;
        self.run(Status::Building, install_command(plan), plan)?;

        Ok(())
    }

    fn run(&self, status: Status, cmd: ProcessBuilder, plan: &ToolchainPlan) -> Result<()> {
        self.shell.status(status, plan.variant);
        self.shell.command(cmd.display_command());

        tracing::debug!("running {} with {} argument(s)", cmd.get_program().display(), cmd.get_args().len());
        cmd.run()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use crate::builder::resolve::Resolver;
    use crate::builder::plan::PlanSettings;
    use crate::core::layout::OutputLayout;
    use crate::core::target::{Arch, BuildTarget, Configuration, HostOs, VariantKey};
    use crate::test_support::{fake_cmake, FakeLocator};
    use crate::util::errors::Error;
    use crate::util::shell::{ColorChoice, Verbosity};

    fn plan_for(tmp: &Path, cmake: &Path) -> ToolchainPlan {
        let layout = OutputLayout::new(tmp.join("out"));
        let locator = FakeLocator::empty();
        let settings = PlanSettings {
            cmake: cmake.to_path_buf(),
            ..PlanSettings::default()
        };
        let target = BuildTarget::new(
            VariantKey::new(HostOs::Linux, Arch::Arm64, Configuration::Release),
            "ns1",
        )
        .unwrap();

        Resolver::new(tmp.join("llvm"), &layout, &locator)
            .with_settings(settings)
            .resolve(&target)
    }

    #[test]
    fn test_runs_configure_then_install() {
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("calls.log");
        let cmake = fake_cmake(tmp.path(), &log, None);
        let plan = plan_for(tmp.path(), &cmake);
        let shell = Shell::new(Verbosity::Quiet, ColorChoice::Never);

        BuildExecutor::new(&shell).execute(&plan).unwrap();

        assert!(plan.build_dir.is_dir());
        assert!(plan.install_dir.is_dir());

        let calls = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = calls.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("-S "));
        assert!(lines[0].contains("-DLLVM_ENABLE_RUNTIMES=libcxx;libcxxabi;libunwind"));
        assert!(lines[1].starts_with("--build "));
        assert!(lines[1].ends_with("--target install -j 4"));
    }

    #[test]
    fn test_configure_failure_stops_build() {
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("calls.log");
        let cmake = fake_cmake(tmp.path(), &log, Some(("-S", 7)));
        let plan = plan_for(tmp.path(), &cmake);
        let shell = Shell::new(Verbosity::Quiet, ColorChoice::Never);

        let err = BuildExecutor::new(&shell).execute(&plan).unwrap_err();

        assert!(matches!(err, Error::ExternalProcess { .. }));
        assert_eq!(err.exit_code(), Some(7));
        // Only the configure call was attempted
        assert_eq!(fs::read_to_string(&log).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_install_failure_surfaces_exit_code() {
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("calls.log");
        let cmake = fake_cmake(tmp.path(), &log, Some(("--build", 2)));
        let plan = plan_for(tmp.path(), &cmake);
        let shell = Shell::new(Verbosity::Quiet, ColorChoice::Never);

        let err = BuildExecutor::new(&shell).execute(&plan).unwrap_err();
        assert_eq!(err.exit_code(), Some(2));
        assert!(err.to_string().contains("--target install"));
    }
}
