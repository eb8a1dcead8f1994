//! Shared utilities

pub mod config;
pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod shell;

pub use config::Config;
pub use errors::{Error, Result};
pub use process::ProcessBuilder;
pub use shell::Shell;
