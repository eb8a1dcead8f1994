//! Check a package archive against its `.sha256` sidecar.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::util::errors::{Error, IoResultExt, Result};
use crate::util::hash::{parse_checksum_line, sha256_file};

/// Path of the checksum sidecar written next to `archive`.
pub fn checksum_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_owned();
    name.push(".sha256");
    PathBuf::from(name)
}

/// Recompute the archive digest and compare it with the recorded one.
///
/// Returns the verified digest.
pub fn verify_package(archive: &Path) -> Result<String> {
    let sidecar = checksum_path(archive);
    let contents = fs::read_to_string(&sidecar).with_path("read", &sidecar)?;

    let (expected, recorded_name) = parse_checksum_line(&contents).ok_or_else(|| {
        Error::io_at(
            "parse",
            &sidecar,
            io::Error::new(io::ErrorKind::InvalidData, "not a sha256sum line"),
        )
    })?;

    let file_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if recorded_name != file_name {
        return Err(Error::invalid(
            "checksum file entry",
            recorded_name,
            format!("`{}`", file_name),
        ));
    }

    let actual = sha256_file(archive)?;
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(Error::ChecksumMismatch {
            file: archive.display().to_string(),
            expected: expected.to_ascii_lowercase(),
            actual,
        });
    }

    tracing::debug!("verified {} ({})", archive.display(), actual);
    Ok(actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::util::hash::{checksum_line, sha256_bytes};

    fn write_pair(dir: &Path, contents: &[u8], recorded: &str) -> PathBuf {
        let archive = dir.join("pkg.zip");
        fs::write(&archive, contents).unwrap();
        fs::write(checksum_path(&archive), checksum_line(recorded, "pkg.zip")).unwrap();
        archive
    }

    #[test]
    fn test_checksum_path() {
        assert_eq!(
            checksum_path(Path::new("out/packages/a.zip")),
            PathBuf::from("out/packages/a.zip.sha256")
        );
    }

    #[test]
    fn test_matching_digest_verifies() {
        let tmp = TempDir::new().unwrap();
        let digest = sha256_bytes(b"archive");
        let archive = write_pair(tmp.path(), b"archive", &digest);

        assert_eq!(verify_package(&archive).unwrap(), digest);
    }

    #[test]
    fn test_tampered_archive_is_mismatch() {
        let tmp = TempDir::new().unwrap();
        let digest = sha256_bytes(b"archive");
        let archive = write_pair(tmp.path(), b"archive!", &digest);

        let err = verify_package(&archive).unwrap_err();
        match err {
            Error::ChecksumMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, digest);
                assert_eq!(actual, sha256_bytes(b"archive!"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_sidecar_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("pkg.zip");
        fs::write(&archive, b"archive").unwrap();

        let err = verify_package(&archive).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("pkg.zip.sha256"));
    }

    #[test]
    fn test_sidecar_for_other_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("pkg.zip");
        fs::write(&archive, b"archive").unwrap();
        fs::write(
            checksum_path(&archive),
            checksum_line(&sha256_bytes(b"archive"), "other.zip"),
        )
        .unwrap();

        assert!(verify_package(&archive).unwrap_err().is_invalid_argument());
    }
}
