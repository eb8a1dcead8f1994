//! Hashing utilities for package checksums.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::util::errors::{IoResultExt, Result};

/// Read size used when streaming a file through the hasher.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Compute SHA256 hash of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute SHA256 hash of a file, reading it in fixed-size chunks.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_path("open file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer).with_path("read file for hashing", path)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// A `sha256sum`-compatible line: `<hex>  <name>\n`.
pub fn checksum_line(digest: &str, file_name: &str) -> String {
    format!("{}  {}\n", digest, file_name)
}

/// Split a `sha256sum` line into `(digest, file_name)`.
///
/// Accepts the binary-mode marker (`<hex> *<name>`) as well.
pub fn parse_checksum_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (digest, rest) = line.split_once(' ')?;
    let name = rest.strip_prefix(' ').or_else(|| rest.strip_prefix('*'))?;

    let well_formed = digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit());
    if well_formed && !name.is_empty() {
        Some((digest, name))
    } else {
        None
    }
}
