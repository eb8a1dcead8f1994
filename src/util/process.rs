//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::util::errors::{Error, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Execute with inherited stdio and return the exit status.
    ///
    /// The child's output goes straight to the terminal, untouched.
    pub fn status(&self) -> Result<ExitStatus> {
        let mut cmd = self.build_command();
        cmd.status().map_err(|e| {
            Error::io(format!("failed to execute `{}`", self.program.display()), e)
        })
    }

    /// Execute with inherited stdio and require a zero exit.
    pub fn run(&self) -> Result<()> {
        let status = self.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::ExternalProcess {
                command: self.display_command(),
                code: status.code(),
            })
        }
    }

    /// Display the command, shell-quoted, for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![quote(&self.program.display().to_string())];
        parts.extend(self.args.iter().map(|a| quote(a)));
        parts.join(" ")
    }
}

/// POSIX-shell quote `arg` when it contains anything beyond a safe set.
fn quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:+,@%".contains(c));

    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\"'\"'"))
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("cmake").args(["--build", "out", "-j", "4"]);
        assert_eq!(pb.display_command(), "cmake --build out -j 4");
    }

    #[test]
    fn test_display_command_quotes() {
        let pb = ProcessBuilder::new("cmake")
            .arg("-DLLVM_ENABLE_RUNTIMES=libcxx;libcxxabi")
            .arg("-DCMAKE_CXX_FLAGS=-DA -DB")
            .arg("it's");

        assert_eq!(
            pb.display_command(),
            "cmake '-DLLVM_ENABLE_RUNTIMES=libcxx;libcxxabi' '-DCMAKE_CXX_FLAGS=-DA -DB' 'it'\"'\"'s'"
        );
    }

    #[test]
    fn test_args_are_kept_verbatim() {
        let pb = ProcessBuilder::new("cmake").arg("a b").args(["c;d"]);
        assert_eq!(pb.get_args(), &["a b".to_string(), "c;d".to_string()]);
        assert_eq!(pb.get_program(), Path::new("cmake"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_exit_code() {
        let err = ProcessBuilder::new("sh")
            .args(["-c", "exit 3"])
            .run()
            .unwrap_err();
        assert_eq!(err.exit_code(), Some(3));

        ProcessBuilder::new("sh").args(["-c", "exit 0"]).run().unwrap();
    }

    #[test]
    fn test_spawn_failure_is_io() {
        let err = ProcessBuilder::new("definitely-not-a-real-program-xyz")
            .run()
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
