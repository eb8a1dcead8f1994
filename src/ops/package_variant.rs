//! Package an installed variant.
//!
//! Produces three files in the packages directory: the zip archive, a
//! `<archive>.sha256` sidecar and a `<archive>.json` manifest. Each one is
//! written to a temporary file first, so an interrupted run never leaves a
//! partial artifact under its final name.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::core::layout::OutputLayout;
use crate::core::variant::VariantIdentity;
use crate::util::errors::{Error, IoResultExt, Result};
use crate::util::fs::{persist, relative_unix_path, temp_file_beside, write_atomic};
use crate::util::hash::{checksum_line, sha256_file};
use crate::util::shell::{Shell, Status};

/// Paths and digest of a finished package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageArtifacts {
    pub archive: PathBuf,
    pub checksum: PathBuf,
    pub manifest: PathBuf,
    /// Lowercase hex SHA-256 of the archive.
    pub digest: String,
    /// Number of files stored in the archive.
    pub entries: usize,
}

/// Package the variant installed under `out_root`.
pub fn package_variant(
    out_root: &Path,
    identity: &VariantIdentity,
    shell: &Shell,
) -> Result<PackageArtifacts> {
    let layout = OutputLayout::new(out_root);
    package(
        &layout.install_dir(&identity.key()),
        &layout.packages_dir(),
        identity,
        shell,
    )
}

/// Archive `install_dir` into `packages_dir` and write the sidecar files.
pub fn package(
    install_dir: &Path,
    packages_dir: &Path,
    identity: &VariantIdentity,
    shell: &Shell,
) -> Result<PackageArtifacts> {
    if !install_dir.is_dir() {
        return Err(Error::io_at(
            "read install directory",
            install_dir,
            io::Error::new(io::ErrorKind::NotFound, "directory does not exist"),
        ));
    }

    let name = identity.package_name();
    let archive = packages_dir.join(&name);
    let checksum = packages_dir.join(format!("{}.sha256", name));
    let manifest = packages_dir.join(format!("{}.json", name));

    shell.status(Status::Packaging, &name);

    let files = collect_files(install_dir)?;
    tracing::debug!("archiving {} file(s) from {}", files.len(), install_dir.display());
    write_archive(&archive, &files, shell)?;

    let digest = sha256_file(&archive)?;
    write_atomic(&checksum, checksum_line(&digest, &name).as_bytes())?;

    let json = identity.manifest().to_json_pretty()?;
    write_atomic(&manifest, json.as_bytes())?;

    shell.status(Status::Finished, archive.display());
    shell.note(format!("sha256 {}", digest));

    Ok(PackageArtifacts {
        archive,
        checksum,
        manifest,
        digest,
        entries: files.len(),
    })
}

/// A regular file under the install tree and its archive name.
struct ArchiveEntry {
    path: PathBuf,
    name: String,
}

/// Regular files under `root`, in a stable order. Symlinks are not followed
/// and not stored.
fn collect_files(root: &Path) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("filesystem loop"));
            Error::io_at("walk", &path, source)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = relative_unix_path(root, entry.path()).ok_or_else(|| {
            Error::io_at(
                "archive",
                entry.path(),
                io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8"),
            )
        })?;

        entries.push(ArchiveEntry {
            path: entry.into_path(),
            name,
        });
    }

    Ok(entries)
}

fn write_archive(dest: &Path, files: &[ArchiveEntry], shell: &Shell) -> Result<()> {
    let tmp = temp_file_beside(dest)?;
    let mut zip = ZipWriter::new(tmp);
    let mut progress = shell.progress(files.len() as u64, "Compressing");

    for file in files {
        zip.start_file(file.name.as_str(), entry_options())
            .map_err(|e| zip_error(dest, e))?;

        let mut reader = BufReader::new(File::open(&file.path).with_path("open", &file.path)?);
        io::copy(&mut reader, &mut zip).with_path("compress", &file.path)?;
        progress.inc(1);
    }
    progress.finish();

    let tmp = zip.finish().map_err(|e| zip_error(dest, e))?;
    persist(tmp, dest)
}

/// Fixed timestamp and mode so identical trees produce identical archives.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
}

fn zip_error(dest: &Path, err: zip::result::ZipError) -> Error {
    Error::io_at("write archive", dest, io::Error::other(err))
}
