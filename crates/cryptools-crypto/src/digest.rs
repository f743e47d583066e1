//! Message digests (SHA-1, SHA-256, SHA-384, SHA-512)
//!
//! Provides single-shot digests, hex helpers, and streaming file digests.
//! SHA-1 is kept for interoperability with legacy formats only.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::Result;

/// Supported hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-1 (20-byte output, legacy)
    Sha1,
    /// SHA-256 (32-byte output)
    #[default]
    Sha256,
    /// SHA-384 (48-byte output)
    Sha384,
    /// SHA-512 (64-byte output)
    Sha512,
}

impl HashAlgorithm {
    /// Digest size in bytes
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Canonical algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }
}

/// Compute the digest of data using the specified algorithm
///
/// # Arguments
/// * `data` - Data to hash
/// * `algorithm` - Hash algorithm to use
///
/// # Returns
/// Digest bytes (20/32/48/64 bytes depending on the algorithm)
pub fn digest(data: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// Compute a digest and return it as a hex string
pub fn digest_hex(data: &[u8], algorithm: HashAlgorithm) -> String {
    hex::encode(digest(data, algorithm))
}

/// Verify that data matches a given digest
pub fn verify(data: &[u8], expected: &[u8], algorithm: HashAlgorithm) -> bool {
    digest(data, algorithm) == expected
}

/// Digest a file by streaming its contents
///
/// # Arguments
/// * `path` - File to digest
/// * `algorithm` - Hash algorithm to use
pub fn digest_file(path: &Path, algorithm: HashAlgorithm) -> Result<Vec<u8>> {
    match algorithm {
        HashAlgorithm::Sha1 => stream_digest::<Sha1>(path),
        HashAlgorithm::Sha256 => stream_digest::<Sha256>(path),
        HashAlgorithm::Sha384 => stream_digest::<Sha384>(path),
        HashAlgorithm::Sha512 => stream_digest::<Sha512>(path),
    }
}

fn stream_digest<D: Digest>(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut hasher = D::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_vec())
}

/// Digest outcome for a single file within a batch
#[derive(Debug)]
pub struct FileDigest {
    pub path: PathBuf,
    pub outcome: Result<Vec<u8>>,
}

/// Digest a batch of files, one outcome per file
///
/// Each file is digested independently. A file that cannot be read yields an
/// error outcome for that file only and never aborts its siblings.
pub fn digest_batch<P: AsRef<Path>>(paths: &[P], algorithm: HashAlgorithm) -> Vec<FileDigest> {
    paths
        .iter()
        .map(|p| FileDigest {
            path: p.as_ref().to_path_buf(),
            outcome: digest_file(p.as_ref(), algorithm),
        })
        .collect()
}
