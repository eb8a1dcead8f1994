//! Output directory contract.
//!
//! ```text
//! <out-root>/build/<host-os>-<arch>-<config>/     generator scratch
//! <out-root>/install/<host-os>-<arch>-<config>/   install tree
//! <out-root>/packages/                            published artifacts
//! ```
//!
//! Downstream consumers rely on this layout exactly.

use std::path::{Path, PathBuf};

use crate::core::target::VariantKey;
use crate::util::errors::{IoResultExt, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Use `root` as given.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OutputLayout { root: root.into() }
    }

    /// Anchor `root` to the current directory. The path does not need to exist.
    pub fn absolute(root: &Path) -> Result<Self> {
        let root = std::path::absolute(root).with_path("resolve output root", root)?;
        Ok(OutputLayout { root })
    }

    pub fn build_dir(&self, key: &VariantKey) -> PathBuf {
        self.root.join("build").join(key.to_string())
    }

    pub fn install_dir(&self, key: &VariantKey) -> PathBuf {
        self.root.join("install").join(key.to_string())
    }

    pub fn packages_dir(&self) -> PathBuf {
        self.root.join("packages")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::{Arch, Configuration, HostOs};

    #[test]
    fn test_variant_dirs_are_namespaced() {
        let layout = OutputLayout::new("/out");
        let key = VariantKey::new(HostOs::Windows, Arch::Arm64, Configuration::Release);

        assert_eq!(
            layout.build_dir(&key),
            Path::new("/out/build/windows-arm64-Release")
        );
        assert_eq!(
            layout.install_dir(&key),
            Path::new("/out/install/windows-arm64-Release")
        );
        assert_eq!(layout.packages_dir(), Path::new("/out/packages"));
    }

    #[test]
    fn test_distinct_variants_never_collide() {
        let layout = OutputLayout::new("/out");
        let a = VariantKey::new(HostOs::Linux, Arch::X64, Configuration::Debug);
        let b = VariantKey::new(HostOs::Linux, Arch::X64, Configuration::Release);
        assert_ne!(layout.build_dir(&a), layout.build_dir(&b));
        assert_ne!(layout.install_dir(&a), layout.install_dir(&b));
    }

    #[test]
    fn test_absolute_root() {
        let layout = OutputLayout::absolute(Path::new("relative/out")).unwrap();
        assert!(layout.packages_dir().is_absolute());
        assert!(layout.packages_dir().ends_with("relative/out/packages"));
    }
}
