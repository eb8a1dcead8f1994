//! Centralized terminal output.
//!
//! Every user-visible line goes through `Shell` so that spacing, color and
//! verbosity are handled in one place:
//! - aligned status messages (`   Resolving linux-x64-Release`)
//! - the echo of every external command before it runs
//! - progress bars (via indicatif) for long file loops
//!
//! Output goes to stderr; stdout is reserved for machine-readable results.

use std::fmt::Display;
use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: warnings, toolchain choice and the command log, no progress
    Quiet,
    /// Default: status messages + progress bars
    #[default]
    Normal,
    /// --verbose: status lines plus debug detail, no progress bars
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Finished,
    Verified,

    // In-progress statuses (cyan)
    Resolving,
    Configuring,
    Building,
    Packaging,

    // Info statuses (blue)
    Info,
    Toolchain,

    // Warning status (yellow)
    Warning,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Finished => "Finished",
            Status::Verified => "Verified",
            Status::Resolving => "Resolving",
            Status::Configuring => "Configuring",
            Status::Building => "Building",
            Status::Packaging => "Packaging",
            Status::Info => "Info",
            Status::Toolchain => "Toolchain",
            Status::Warning => "warning",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Finished | Status::Verified => "\x1b[1;32m",
            Status::Resolving
            | Status::Configuring
            | Status::Building
            | Status::Packaging => "\x1b[1;36m",
            Status::Info | Status::Toolchain => "\x1b[1;34m",
            Status::Warning => "\x1b[1;33m",
        }
    }

    /// Warnings and toolchain choices are shown even with --quiet.
    fn shown_when_quiet(&self) -> bool {
        matches!(self, Status::Warning | Status::Toolchain)
    }

    const WIDTH: usize = 12;
}

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    verbosity: Verbosity,
    use_color: bool,
}

impl Shell {
    pub fn new(verbosity: Verbosity, color: ColorChoice) -> Self {
        let use_color = match color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };

        Shell {
            verbosity,
            use_color,
        }
    }

    /// Create a shell from CLI flags. `quiet` wins over `verbose`.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Shell::new(verbosity, color)
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Print a status message: `{status:>12} {message}`.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_quiet() && !status.shown_when_quiet() {
            return;
        }

        eprintln!("{} {}", self.format_status(status), msg);
    }

    pub fn note(&self, msg: impl Display) {
        self.status(Status::Info, msg);
    }

    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Echo an external command line before it runs.
    ///
    /// Printed regardless of verbosity: the command log is the audit trail.
    pub fn command(&self, command_line: impl Display) {
        eprintln!("+ {}", command_line);
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();

        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                text,
                width = Status::WIDTH
            )
        } else {
            format!("{:>width$}", text, width = Status::WIDTH)
        }
    }

    /// Create a progress bar. Quiet and verbose shells get a no-op bar.
    pub fn progress(&self, total: u64, msg: impl Display) -> Progress {
        Progress::new(self, total, msg.to_string())
    }
}

/// Progress bar wrapper that respects shell verbosity.
pub struct Progress {
    pb: Option<ProgressBar>,
}

impl Progress {
    fn new(shell: &Shell, total: u64, message: String) -> Self {
        let pb = if shell.is_quiet() || shell.is_verbose() || total <= 1 {
            None
        } else {
            let pb = ProgressBar::new(total);
            if let Ok(style) =
                ProgressStyle::default_bar().template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb.set_message(message);
            Some(pb)
        };

        Progress { pb }
    }

    pub fn inc(&mut self, delta: u64) {
        if let Some(pb) = &self.pb {
            pb.inc(delta);
        }
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        let shell = Shell::from_flags(false, false, ColorChoice::Never);
        assert!(!shell.is_quiet());
        assert!(!shell.is_verbose());

        assert!(Shell::from_flags(true, false, ColorChoice::Never).is_quiet());
        assert!(Shell::from_flags(false, true, ColorChoice::Never).is_verbose());

        // Quiet takes precedence
        let shell = Shell::from_flags(true, true, ColorChoice::Never);
        assert!(shell.is_quiet());
        assert!(!shell.is_verbose());
    }

    #[test]
    fn test_color_choice_parse() {
        assert_eq!("auto".parse::<ColorChoice>().unwrap(), ColorChoice::Auto);
        assert_eq!("ALWAYS".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!("never".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_status_formatting() {
        let shell = Shell::new(Verbosity::Normal, ColorChoice::Never);

        let formatted = shell.format_status(Status::Packaging);
        assert_eq!(formatted.trim(), "Packaging");
        assert_eq!(formatted.len(), 12);

        let colored = Shell::new(Verbosity::Normal, ColorChoice::Always).format_status(Status::Warning);
        assert!(colored.starts_with("\x1b[1;33m"));
        assert!(colored.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_quiet_keeps_warnings_and_toolchain() {
        assert!(Status::Warning.shown_when_quiet());
        assert!(Status::Toolchain.shown_when_quiet());
        assert!(!Status::Resolving.shown_when_quiet());
        assert!(!Status::Info.shown_when_quiet());
        assert!(!Status::Finished.shown_when_quiet());
    }
}
