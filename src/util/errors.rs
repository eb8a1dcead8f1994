//! Error taxonomy shared by every phase.
//!
//! Three categories cover the whole tool: arguments outside their closed
//! domain, an external process that exited non-zero, and filesystem failures.
//! Every one of them aborts the current command.

use std::fmt;
use std::io;
use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// An input value is outside its enumerated domain.
    #[error("invalid {what} `{value}`: expected {expected}")]
    #[diagnostic(code(cxxprebuilt::invalid_argument))]
    InvalidArgument {
        what: &'static str,
        value: String,
        expected: String,
    },

    /// A configure/build/install subprocess returned non-zero.
    ///
    /// The tool's own output has already been streamed to the terminal, so
    /// only the command and exit code are carried here.
    #[error("`{command}` failed with {}", ExitCode(.code))]
    #[diagnostic(
        code(cxxprebuilt::external_process),
        help("the tool output above contains the underlying diagnostic")
    )]
    ExternalProcess { command: String, code: Option<i32> },

    /// Directory/file creation, archive writing or hashing failed.
    #[error("{context}")]
    #[diagnostic(code(cxxprebuilt::io))]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A packaged archive does not match its `.sha256` sidecar.
    #[error("checksum mismatch for `{file}`: expected {expected}, found {actual}")]
    #[diagnostic(
        code(cxxprebuilt::checksum_mismatch),
        help("re-run `cxxprebuilt package` for this variant")
    )]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },
}

impl Error {
    /// Build an `InvalidArgument` error.
    pub fn invalid(what: &'static str, value: impl Into<String>, expected: impl Into<String>) -> Self {
        Error::InvalidArgument {
            what,
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Wrap an I/O error with a message.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    /// Wrap an I/O error that concerns a specific path.
    pub fn io_at(action: &str, path: &Path, source: io::Error) -> Self {
        Error::io(format!("failed to {}: {}", action, path.display()), source)
    }

    /// Whether this error came from argument validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    /// Exit code of the failed external process, if that is what failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::ExternalProcess { code, .. } => *code,
            _ => None,
        }
    }
}

/// Attach path context to `std::io::Result` values.
pub trait IoResultExt<T> {
    fn with_path(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|e| Error::io_at(action, path, e))
    }
}

struct ExitCode<'a>(&'a Option<i32>);

impl fmt::Display for ExitCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "no exit code (terminated by signal)"),
        }
    }
}
