//! Verification dispatcher: hash each manifest entry and compare digests.
//!
//! Entries are independent, so they are spread over a small fixed pool of
//! worker threads. Results come back over a channel and are reported from the
//! calling thread only, one whole line at a time.

mod pool;

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::checksum::{self, DigestError, HashAlgorithm};
use crate::config::SumcheckConfig;
use crate::manifest::ManifestEntry;
use crate::report::Reporter;

/// Worker threads used when nothing else is configured.
pub const DEFAULT_WORKERS: usize = 2;

/// Outcome for one manifest entry.
#[derive(Debug, Clone)]
pub enum VerifyStatus {
    /// Computed digest equals the expected one.
    Ok,
    /// File hashed, digest differs.
    Fail,
    /// Resolved path does not exist; nothing was hashed.
    NotFound,
    /// Unsupported algorithm or read failure, confined to this entry.
    Error(Arc<DigestError>),
}

/// Errors compare by `DigestErrorKind`, not by message.
impl PartialEq for VerifyStatus {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (VerifyStatus::Ok, VerifyStatus::Ok)
            | (VerifyStatus::Fail, VerifyStatus::Fail)
            | (VerifyStatus::NotFound, VerifyStatus::NotFound) => true,
            (VerifyStatus::Error(a), VerifyStatus::Error(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

impl Eq for VerifyStatus {}

impl fmt::Display for VerifyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyStatus::Ok => write!(f, "OK"),
            VerifyStatus::Fail => write!(f, "FAIL"),
            VerifyStatus::NotFound => write!(f, "NOT FOUND"),
            VerifyStatus::Error(e) => write!(f, "ERROR: {}", e),
        }
    }
}

/// Result for one entry, handed to the reporter as soon as it is ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Manifest line the entry came from.
    pub line: usize,
    /// Entry file name joined onto the source folder.
    pub resolved_path: PathBuf,
    pub status: VerifyStatus,
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.resolved_path.display(), self.status)
    }
}

/// Dispatcher tuning. Neither knob affects results, only throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Number of worker threads (clamped to at least 1).
    pub workers: usize,
    /// Read chunk size for hashing.
    pub buffer_bytes: usize,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            buffer_bytes: checksum::BUF_SIZE,
        }
    }
}

/// Out-of-range config values are clamped (see `SumcheckConfig::clamped`).
impl From<&SumcheckConfig> for VerifyOptions {
    fn from(cfg: &SumcheckConfig) -> Self {
        let cfg = cfg.clone().clamped();
        Self {
            workers: cfg.workers,
            buffer_bytes: cfg.buffer_bytes,
        }
    }
}

/// Per-status counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifySummary {
    pub ok: usize,
    pub failed: usize,
    pub not_found: usize,
    pub errors: usize,
}

impl VerifySummary {
    pub fn record(&mut self, status: &VerifyStatus) {
        match status {
            VerifyStatus::Ok => self.ok += 1,
            VerifyStatus::Fail => self.failed += 1,
            VerifyStatus::NotFound => self.not_found += 1,
            VerifyStatus::Error(_) => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ok + self.failed + self.not_found + self.errors
    }

    /// True when every entry verified `OK`.
    pub fn all_ok(&self) -> bool {
        self.ok == self.total()
    }
}

/// Verify a single entry against files under `source_folder`.
///
/// Existence is checked before the algorithm is resolved, so a missing file is
/// `NotFound` even when its algorithm is unsupported.
pub fn verify_entry(
    entry: &ManifestEntry,
    source_folder: &Path,
    buf_size: usize,
) -> VerificationResult {
    let resolved_path = source_folder.join(&entry.file_name);
    let status = if !resolved_path.exists() {
        VerifyStatus::NotFound
    } else {
        match entry.algorithm.parse::<HashAlgorithm>().and_then(|algorithm| {
            checksum::digest_path_with_buffer(&resolved_path, algorithm, buf_size)
        }) {
            Ok(actual) if actual == entry.expected_digest => VerifyStatus::Ok,
            Ok(actual) => {
                tracing::debug!(
                    path = %resolved_path.display(),
                    expected = %entry.expected_digest,
                    actual = %actual,
                    "digest mismatch"
                );
                VerifyStatus::Fail
            }
            Err(e) => {
                tracing::warn!(line = entry.line, path = %resolved_path.display(), "{}", e);
                VerifyStatus::Error(Arc::new(e))
            }
        }
    };
    VerificationResult {
        line: entry.line,
        resolved_path,
        status,
    }
}

/// Verify every entry on a bounded worker pool, reporting each result as it
/// completes. Returns the per-status summary.
///
/// Per-entry failures never stop the run. An error is returned only when the
/// reporter fails or a worker is lost; remaining queued entries are dropped.
pub fn verify_all(
    entries: Vec<ManifestEntry>,
    source_folder: &Path,
    opts: &VerifyOptions,
    reporter: &mut dyn Reporter,
) -> Result<VerifySummary> {
    let total = entries.len();
    tracing::info!(
        entries = total,
        workers = opts.workers,
        source = %source_folder.display(),
        "verifying manifest entries"
    );
    let summary = pool::run_pool(entries, source_folder, opts, reporter)?;
    tracing::info!(
        ok = summary.ok,
        failed = summary.failed,
        not_found = summary.not_found,
        errors = summary.errors,
        "verification finished"
    );
    Ok(summary)
}
