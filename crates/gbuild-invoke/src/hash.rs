//! SHA-256 digests of build artifacts.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use sha2::{Digest, Sha256};

/// Read `path` fully and return its SHA-256 as lowercase hex.
pub fn file_sha256(path: &Path) -> std::io::Result<String> {
    let data = fs::read(path)?;
    Ok(sha256_hex(&data))
}

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex_encode(&hasher.finalize())
}

/// Print the artifact's digest to stdout as `SHA256: <hex>`.
pub fn report(path: &Path) {
    if let Err(e) = write_report(&mut io::stdout().lock(), path) {
        log::warn!("failed to print digest of {}: {e}", path.display());
    }
}

/// Write `SHA256: <hex>` for `path` to `out`.
///
/// A read failure is logged as a warning and writes nothing; the build has
/// already succeeded by the time this runs. Only errors writing to `out`
/// are returned.
pub fn write_report<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    match file_sha256(path) {
        Ok(digest) => writeln!(out, "SHA256: {digest}"),
        Err(e) => {
            log::warn!("failed to read {} for hashing: {e}", path.display());
            Ok(())
        }
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
