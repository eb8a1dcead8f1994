//! Build target descriptor.
//!
//! A `BuildTarget` names one point of the variant matrix. Every field has a
//! closed domain; values are validated when the descriptor is constructed so
//! nothing downstream has to re-check them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::errors::{Error, Result};

/// Host operating system the runtime is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Windows,
    Linux,
}

impl HostOs {
    pub const ALL: [HostOs; 2] = [HostOs::Windows, HostOs::Linux];

    pub const fn as_str(&self) -> &'static str {
        match self {
            HostOs::Windows => "windows",
            HostOs::Linux => "linux",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostOs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "windows" => Ok(HostOs::Windows),
            "linux" => Ok(HostOs::Linux),
            _ => Err(Error::invalid("host OS", s, "one of: windows, linux")),
        }
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X64,
    Arm64,
}

impl Arch {
    pub const ALL: [Arch; 2] = [Arch::X64, Arch::Arm64];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x64" => Ok(Arch::X64),
            "arm64" => Ok(Arch::Arm64),
            _ => Err(Error::invalid("architecture", s, "one of: x64, arm64")),
        }
    }
}

/// CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Configuration {
    Debug,
    Release,
}

impl Configuration {
    pub const ALL: [Configuration; 2] = [Configuration::Debug, Configuration::Release];

    /// The value passed as `CMAKE_BUILD_TYPE`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::Release => "Release",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Configuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Debug" => Ok(Configuration::Debug),
            "Release" => Ok(Configuration::Release),
            _ => Err(Error::invalid("configuration", s, "one of: Debug, Release")),
        }
    }
}

/// One supported `(host_os, arch)` pair.
///
/// Toolchain selection matches on this exhaustively, so a new platform does
/// not compile until every selection site handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    WindowsX64,
    WindowsArm64,
    LinuxX64,
    LinuxArm64,
}

impl Platform {
    pub const fn new(host_os: HostOs, arch: Arch) -> Self {
        match (host_os, arch) {
            (HostOs::Windows, Arch::X64) => Platform::WindowsX64,
            (HostOs::Windows, Arch::Arm64) => Platform::WindowsArm64,
            (HostOs::Linux, Arch::X64) => Platform::LinuxX64,
            (HostOs::Linux, Arch::Arm64) => Platform::LinuxArm64,
        }
    }

    pub const fn host_os(&self) -> HostOs {
        match self {
            Platform::WindowsX64 | Platform::WindowsArm64 => HostOs::Windows,
            Platform::LinuxX64 | Platform::LinuxArm64 => HostOs::Linux,
        }
    }

    pub const fn arch(&self) -> Arch {
        match self {
            Platform::WindowsX64 | Platform::LinuxX64 => Arch::X64,
            Platform::WindowsArm64 | Platform::LinuxArm64 => Arch::Arm64,
        }
    }
}

/// The `(host_os, arch, config)` triple that namespaces a variant's
/// build and install directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantKey {
    pub host_os: HostOs,
    pub arch: Arch,
    pub config: Configuration,
}

impl VariantKey {
    pub const fn new(host_os: HostOs, arch: Arch, config: Configuration) -> Self {
        VariantKey {
            host_os,
            arch,
            config,
        }
    }

    pub const fn platform(&self) -> Platform {
        Platform::new(self.host_os, self.arch)
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.host_os, self.arch, self.config)
    }
}

/// Feature switches, already normalized to strict values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// libc++ debug mode (`_LIBCPP_ENABLE_DEBUG_MODE`).
    pub iterator_debugging: bool,
    /// Forwarded verbatim into `_LIBCPP_INSTRUMENTED_WITH_ASAN`.
    pub asan_instrumented: String,
    /// Time zone database support as requested; the platform may veto it.
    pub tzdb_requested: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        FeatureFlags {
            iterator_debugging: false,
            asan_instrumented: "0".to_string(),
            tzdb_requested: true,
        }
    }
}

/// A validated, immutable build request for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTarget {
    key: VariantKey,
    abi_namespace: String,
    features: FeatureFlags,
}

impl BuildTarget {
    /// Create a target with default feature flags.
    pub fn new(key: VariantKey, abi_namespace: impl Into<String>) -> Result<Self> {
        let abi_namespace = abi_namespace.into();
        validate_abi_namespace(&abi_namespace)?;

        Ok(BuildTarget {
            key,
            abi_namespace,
            features: FeatureFlags::default(),
        })
    }

    /// Replace the feature flags.
    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    pub fn key(&self) -> VariantKey {
        self.key
    }

    pub fn host_os(&self) -> HostOs {
        self.key.host_os
    }

    pub fn arch(&self) -> Arch {
        self.key.arch
    }

    pub fn config(&self) -> Configuration {
        self.key.config
    }

    pub fn platform(&self) -> Platform {
        self.key.platform()
    }

    pub fn abi_namespace(&self) -> &str {
        &self.abi_namespace
    }

    pub fn features(&self) -> &FeatureFlags {
        &self.features
    }
}

/// ABI namespaces become a C++ inline namespace and part of package file
/// names, so they must be a plain identifier.
pub fn validate_abi_namespace(value: &str) -> Result<()> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::invalid(
            "ABI namespace",
            value,
            "a non-empty C++ identifier (letters, digits, `_`)",
        ))
    }
}
