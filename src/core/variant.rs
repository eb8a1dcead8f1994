//! Variant identity and the package manifest derived from it.

use std::io;

use serde::{Deserialize, Serialize};

use crate::core::target::{validate_abi_namespace, Arch, Configuration, HostOs, VariantKey};
use crate::util::errors::{Error, Result};

/// Prefix shared by every published package name.
pub const PACKAGE_PREFIX: &str = "libcxx-prebuilt";

/// Everything that distinguishes one published package from another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantIdentity {
    key: VariantKey,
    llvm_tag: String,
    abi_namespace: String,
}

impl VariantIdentity {
    pub fn new(
        key: VariantKey,
        llvm_tag: impl Into<String>,
        abi_namespace: impl Into<String>,
    ) -> Result<Self> {
        let llvm_tag = llvm_tag.into();
        let abi_namespace = abi_namespace.into();

        validate_llvm_tag(&llvm_tag)?;
        validate_abi_namespace(&abi_namespace)?;

        Ok(VariantIdentity {
            key,
            llvm_tag,
            abi_namespace,
        })
    }

    pub fn key(&self) -> VariantKey {
        self.key
    }

    pub fn llvm_tag(&self) -> &str {
        &self.llvm_tag
    }

    pub fn abi_namespace(&self) -> &str {
        &self.abi_namespace
    }

    /// `libcxx-prebuilt-<os>-<arch>-<config>-<tag>-<abi>.zip`
    pub fn package_name(&self) -> String {
        format!(
            "{}-{}-{}-{}.zip",
            PACKAGE_PREFIX, self.key, self.llvm_tag, self.abi_namespace
        )
    }

    pub fn manifest(&self) -> PackageManifest {
        PackageManifest {
            llvm_tag: self.llvm_tag.clone(),
            host_os: self.key.host_os,
            arch: self.key.arch,
            config: self.key.config,
            abi_namespace: self.abi_namespace.clone(),
        }
    }
}

/// JSON sidecar describing a package. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub llvm_tag: String,
    pub host_os: HostOs,
    pub arch: Arch,
    pub config: Configuration,
    pub abi_namespace: String,
}

impl PackageManifest {
    /// Two-space indented JSON, no trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::io("failed to serialize package manifest", io::Error::other(e)))
    }
}

/// Tags end up in file names, so path separators and whitespace are rejected.
fn validate_llvm_tag(value: &str) -> Result<()> {
    let bad = value.is_empty()
        || value
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control());

    if bad {
        Err(Error::invalid(
            "LLVM tag",
            value,
            "a non-empty tag without path separators or whitespace",
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> VariantIdentity {
        let key = VariantKey::new(HostOs::Linux, Arch::X64, Configuration::Release);
        VariantIdentity::new(key, "v1", "ns1").unwrap()
    }

    #[test]
    fn test_package_name() {
        assert_eq!(
            identity().package_name(),
            "libcxx-prebuilt-linux-x64-Release-v1-ns1.zip"
        );
    }

    #[test]
    fn test_manifest_json_fields() {
        let json = identity().manifest().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "llvm_tag": "v1",
                "host_os": "linux",
                "arch": "x64",
                "config": "Release",
                "abi_namespace": "ns1"
            })
        );
        // Human-readable indentation, fields in declaration order
        assert!(json.starts_with("{\n  \"llvm_tag\": \"v1\",\n  \"host_os\""));
    }

    #[test]
    fn test_rejects_bad_tags() {
        let key = VariantKey::new(HostOs::Linux, Arch::X64, Configuration::Release);
        assert!(VariantIdentity::new(key, "", "ns1").is_err());
        assert!(VariantIdentity::new(key, "../v1", "ns1").is_err());
        assert!(VariantIdentity::new(key, "llvmorg-20.1.0", "ns1").is_ok());
        assert!(VariantIdentity::new(key, "v1", "").is_err());
    }
}
