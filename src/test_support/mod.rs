//! Test doubles shared by unit tests.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::toolchain::ToolchainLocator;
use crate::core::target::{Arch, BuildTarget, Configuration, FeatureFlags, HostOs, VariantKey};

/// A locator that only knows a fixed set of program names.
#[derive(Debug, Default, Clone)]
pub struct FakeLocator {
    programs: BTreeSet<String>,
}

impl FakeLocator {
    pub fn empty() -> Self {
        FakeLocator::default()
    }

    pub fn with(programs: &[&str]) -> Self {
        FakeLocator {
            programs: programs.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl ToolchainLocator for FakeLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.programs
            .contains(program)
            .then(|| PathBuf::from("/usr/bin").join(program))
    }
}

/// Every variant key crossed with every combination of boolean features.
pub fn all_targets() -> Vec<BuildTarget> {
    let mut targets = Vec::new();

    for host_os in HostOs::ALL {
        for arch in Arch::ALL {
            for config in Configuration::ALL {
                for tzdb_requested in [false, true] {
                    for iterator_debugging in [false, true] {
                        let key = VariantKey::new(host_os, arch, config);
                        let features = FeatureFlags {
                            iterator_debugging,
                            tzdb_requested,
                            ..FeatureFlags::default()
                        };
                        targets.push(
                            BuildTarget::new(key, "ns1")
                                .expect("valid namespace")
                                .with_features(features),
                        );
                    }
                }
            }
        }
    }

    targets
}

/// Write a stand-in `cmake` script that appends its arguments to `log`.
///
/// `fail_on` makes the script exit with the given code when its first
/// argument matches.
#[cfg(unix)]
pub fn fake_cmake(dir: &Path, log: &Path, fail_on: Option<(&str, i32)>) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let failure = match fail_on {
        Some((first_arg, code)) => format!(
            "if [ \"$1\" = \"{}\" ]; then exit {}; fi\n",
            first_arg, code
        ),
        None => String::new(),
    };
    let script = format!(
        "#!/bin/sh\necho \"$*\" >> \"{}\"\n{}exit 0\n",
        log.display(),
        failure
    );

    let path = dir.join("fake-cmake");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Populate `root` with the given `(relative path, contents)` files.
pub fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}
