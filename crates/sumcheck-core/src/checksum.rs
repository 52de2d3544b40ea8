//! Streaming file digests (MD5, SHA-1, SHA-256).
//!
//! Files are read in fixed-size chunks and fed to an incremental hasher, so
//! memory use stays bounded no matter how large the file is.

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default read chunk size (64 KiB).
pub const BUF_SIZE: usize = 64 * 1024;

/// Hash algorithms a manifest entry may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 3] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
    ];

    /// Manifest token for this algorithm.
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = DigestError;

    /// Exact, case-sensitive match on `md5`, `sha1` or `sha256`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            other => Err(DigestError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Failure to produce a digest for one file.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("unsupported hash algorithm `{0}`")]
    UnsupportedAlgorithm(String),

    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of a `DigestError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestErrorKind {
    UnsupportedAlgorithm,
    Io,
}

impl DigestError {
    pub fn kind(&self) -> DigestErrorKind {
        match self {
            DigestError::UnsupportedAlgorithm(_) => DigestErrorKind::UnsupportedAlgorithm,
            DigestError::Io { .. } => DigestErrorKind::Io,
        }
    }
}

/// Incremental hasher for one of the supported algorithms.
enum Hasher {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
}

impl Hasher {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Hasher::Md5(Md5::new()),
            HashAlgorithm::Sha1 => Hasher::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Md5(h) => h.update(data),
            Hasher::Sha1(h) => h.update(data),
            Hasher::Sha256(h) => h.update(data),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Hasher::Md5(h) => hex::encode(h.finalize()),
            Hasher::Sha1(h) => hex::encode(h.finalize()),
            Hasher::Sha256(h) => hex::encode(h.finalize()),
        }
    }
}

/// Digest everything `reader` yields, `buf_size` bytes at a time, as lowercase hex.
pub fn digest_reader<R: Read>(
    mut reader: R,
    algorithm: HashAlgorithm,
    buf_size: usize,
) -> io::Result<String> {
    let mut hasher = Hasher::new(algorithm);
    let mut buf = vec![0u8; buf_size.max(1)];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize_hex())
}

/// Compute the digest of a file using the default 64 KiB chunk size.
pub fn digest_path(path: &Path, algorithm: HashAlgorithm) -> Result<String, DigestError> {
    digest_path_with_buffer(path, algorithm, BUF_SIZE)
}

/// Compute the digest of a file, reading `buf_size` bytes per chunk.
/// The file handle is closed on return, including after a failed read.
pub fn digest_path_with_buffer(
    path: &Path,
    algorithm: HashAlgorithm,
    buf_size: usize,
) -> Result<String, DigestError> {
    let io_err = |source| DigestError::Io {
        path: path.to_path_buf(),
        source,
    };
    let f = File::open(path).map_err(io_err)?;
    digest_reader(f, algorithm, buf_size).map_err(io_err)
}
