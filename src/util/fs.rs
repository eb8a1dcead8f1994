//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::{Component, Path};

use tempfile::NamedTempFile;

use crate::util::errors::{Error, IoResultExt, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).with_path("create directory", path)?;
    }
    Ok(())
}

/// Create a temporary file next to `dest`, so it can be renamed into place.
pub fn temp_file_beside(dest: &Path) -> Result<NamedTempFile> {
    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    ensure_dir(parent)?;

    tempfile::Builder::new()
        .prefix(".tmp-")
        .tempfile_in(parent)
        .with_path("create temporary file in", parent)
}

/// Move a finished temporary file to `dest`, replacing whatever was there.
pub fn persist(tmp: NamedTempFile, dest: &Path) -> Result<()> {
    tmp.as_file().sync_all().with_path("flush", tmp.path())?;
    tmp.persist(dest)
        .map_err(|e| Error::io_at("write", dest, e.error))?;
    Ok(())
}

/// Write `contents` to `dest` atomically: readers see either the old file or
/// the complete new one.
pub fn write_atomic(dest: &Path, contents: &[u8]) -> Result<()> {
    let mut tmp = temp_file_beside(dest)?;
    tmp.write_all(contents).with_path("write", tmp.path())?;
    persist(tmp, dest)
}

/// Path of `path` relative to `base`, joined with `/` regardless of host.
///
/// Returns `None` if `path` is not inside `base` or contains components that
/// cannot be represented in an archive.
pub fn relative_unix_path(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let mut parts = Vec::new();

    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            _ => return None,
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/c");

        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_write_atomic_replaces() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out/file.txt");

        write_atomic(&dest, b"first").unwrap();
        write_atomic(&dest, b"second").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "second");
        // No temporary files left behind
        let leftovers: Vec<_> = fs::read_dir(dest.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".tmp-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_relative_unix_path() {
        let base = Path::new("/install");
        assert_eq!(
            relative_unix_path(base, &base.join("include").join("c++").join("v1")),
            Some("include/c++/v1".to_string())
        );
        assert_eq!(relative_unix_path(base, base), None);
        assert_eq!(relative_unix_path(base, Path::new("/elsewhere/x")), None);
    }
}
