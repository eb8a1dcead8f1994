//! Configuration file support.
//!
//! Two optional locations are read, later ones overriding earlier ones:
//! - Global: `~/.cxxprebuilt/config.toml` - user-wide defaults
//! - Project: `.cxxprebuilt/config.toml` in the working directory
//!
//! With no file present every setting takes its built-in default, which
//! reproduces the published build matrix exactly.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::plan::PlanSettings;

/// Tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build driver settings
    pub build: BuildConfig,

    /// Compiler discovery settings
    pub toolchain: ToolchainConfig,
}

/// Settings for the CMake invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// CMake executable (name on PATH or full path)
    pub cmake: Option<PathBuf>,

    /// Generator passed to `-G`
    pub generator: Option<String>,

    /// Worker count for the build-and-install step
    pub jobs: Option<usize>,
}

/// Settings for compiler discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Pinned clang major version preferred on Linux x64
    pub pinned_clang: Option<u32>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is missing
    /// or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.cmake.is_some() {
            self.build.cmake = other.build.cmake;
        }
        if other.build.generator.is_some() {
            self.build.generator = other.build.generator;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.toolchain.pinned_clang.is_some() {
            self.toolchain.pinned_clang = other.toolchain.pinned_clang;
        }
    }

    /// Settings for the resolver, with built-in defaults for anything unset.
    pub fn plan_settings(&self) -> PlanSettings {
        let defaults = PlanSettings::default();

        PlanSettings {
            cmake: self.build.cmake.clone().unwrap_or(defaults.cmake),
            generator: self.build.generator.clone().unwrap_or(defaults.generator),
            jobs: self.build.jobs.filter(|j| *j > 0).unwrap_or(defaults.jobs),
            pinned_clang: self.toolchain.pinned_clang.unwrap_or(defaults.pinned_clang),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.cxxprebuilt/config.toml)
/// 2. Global config (~/.cxxprebuilt/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge(Config::load_or_default(global));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.cxxprebuilt).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".cxxprebuilt"))
}

/// Get the global config path (~/.cxxprebuilt/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.cxxprebuilt/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".cxxprebuilt").join("config.toml")
}
