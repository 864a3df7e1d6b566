//! Variant A: any file, stored verbatim.
//!
//! ```text
//! "CSLXRAW" | u32be version | u32be name_len | name (utf-8) | zlib(payload)
//! ```

use crate::error::{ContainerError, ContainerResult};
use crate::header::Reader;
use crate::zlib;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const RAW_MAGIC: &[u8] = b"CSLXRAW";
pub const RAW_VERSION: u32 = 1;
pub const PACKAGE_EXTENSION: &str = "cslx";

/// Hex digits of the SHA-256 digest kept as a file's certificate.
pub const CERT_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPackage {
    pub version: u32,
    pub name: String,
    pub payload: Vec<u8>,
}

impl RawPackage {
    /// Final path component of the embedded name, the only part ever used
    /// when the payload is written back to disk.
    pub fn file_name(&self) -> ContainerResult<&str> {
        Path::new(&self.name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ContainerError::InvalidName(self.name.clone()))
    }
}

pub fn pack_raw(name: &str, payload: &[u8], level: u32) -> ContainerResult<Vec<u8>> {
    let name_len = u32::try_from(name.len())
        .map_err(|_| ContainerError::InvalidName(name.to_string()))?;
    let compressed = zlib::compress(payload, level)?;

    let mut out = Vec::with_capacity(RAW_MAGIC.len() + 8 + name.len() + compressed.len());
    out.extend_from_slice(RAW_MAGIC);
    out.extend_from_slice(&RAW_VERSION.to_be_bytes());
    out.extend_from_slice(&name_len.to_be_bytes());
    out.extend_from_slice(name.as_bytes());
    out.extend_from_slice(&compressed);

    debug!(name, raw = payload.len(), packed = out.len(), "raw package built");
    Ok(out)
}

pub fn unpack_raw(bytes: &[u8]) -> ContainerResult<RawPackage> {
    let mut reader = Reader::new(bytes);
    reader.expect_magic(RAW_MAGIC, "CSLXRAW")?;
    let version = reader.version(RAW_VERSION)?;

    let name_len = reader.u32_be("name length")? as usize;
    let name = std::str::from_utf8(reader.take(name_len, "name")?)
        .map_err(|e| ContainerError::InvalidName(e.to_string()))?
        .to_string();
    let payload = zlib::decompress(reader.rest())?;

    Ok(RawPackage {
        version,
        name,
        payload,
    })
}

/// Pack the file at `path` under its own file name. Writes to `out`, or to
/// `path` with `.cslx` appended.
pub fn pack_raw_file(path: &Path, out: Option<&Path>, level: u32) -> ContainerResult<PathBuf> {
    let payload = fs::read(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ContainerError::InvalidName(path.display().to_string()))?;

    let package = pack_raw(name, &payload, level)?;
    let out = match out {
        Some(out) => out.to_path_buf(),
        None => appended_extension(path),
    };
    fs::write(&out, package)?;
    Ok(out)
}

/// Restore a raw package into `dir`. Nothing is written unless the whole
/// package decoded successfully.
pub fn unpack_raw_into(pkg_path: &Path, dir: &Path) -> ContainerResult<PathBuf> {
    let package = unpack_raw(&fs::read(pkg_path)?)?;
    let out = dir.join(package.file_name()?);
    fs::write(&out, &package.payload)?;
    debug!(path = %out.display(), bytes = package.payload.len(), "raw package restored");
    Ok(out)
}

fn appended_extension(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(PACKAGE_EXTENSION);
    PathBuf::from(name)
}

/// First 32 hex digits of the payload's SHA-256.
pub fn certificate(payload: &[u8]) -> String {
    let mut digest = hex::encode(Sha256::digest(payload));
    digest.truncate(CERT_LEN);
    digest
}

/// Operational listing describing how a file is collapsed, followed by its
/// certificate.
pub fn collapse_listing(name: &str, payload: &[u8]) -> String {
    let cert = certificate(payload);
    [
        "=== CSL :: SHORTENED OPERATIONAL CODE ===".to_string(),
        "00: INIT mode=ANY".to_string(),
        format!("01: OPEN name={}", name),
        format!("02: CANON bytes={}", payload.len()),
        "03: HASH algo=sha256".to_string(),
        format!("04: CERT {}", cert),
        "05: PACK zlib".to_string(),
        format!("06: EMIT .{}", PACKAGE_EXTENSION),
        "07: HALT".to_string(),
        format!("=== CERT (sha256/{}) ===", CERT_LEN),
        cert,
    ]
    .join("\n")
}
