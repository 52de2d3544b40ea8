use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum::BUF_SIZE;
use crate::verify::DEFAULT_WORKERS;

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_buffer_bytes() -> usize {
    BUF_SIZE
}

/// Global configuration loaded from `~/.config/sumcheck/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SumcheckConfig {
    /// Number of files hashed concurrently.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Read chunk size in bytes used while hashing.
    #[serde(default = "default_buffer_bytes")]
    pub buffer_bytes: usize,
}

impl Default for SumcheckConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            buffer_bytes: BUF_SIZE,
        }
    }
}

/// Smallest read chunk accepted from config.
pub const MIN_BUFFER_BYTES: usize = 4 * 1024;
/// Largest read chunk accepted from config; keeps per-worker memory small.
pub const MAX_BUFFER_BYTES: usize = 16 * 1024 * 1024;
/// Upper bound on configured worker threads.
pub const MAX_WORKERS: usize = 64;

impl SumcheckConfig {
    /// Pull out-of-range values back into bounds, warning about each one.
    pub fn clamped(self) -> Self {
        let workers = self.workers.clamp(1, MAX_WORKERS);
        if workers != self.workers {
            tracing::warn!("config workers={} out of range, using {}", self.workers, workers);
        }
        let buffer_bytes = self.buffer_bytes.clamp(MIN_BUFFER_BYTES, MAX_BUFFER_BYTES);
        if buffer_bytes != self.buffer_bytes {
            tracing::warn!(
                "config buffer_bytes={} out of range, using {}",
                self.buffer_bytes,
                buffer_bytes
            );
        }
        Self {
            workers,
            buffer_bytes,
        }
    }
}

/// Existing `~/.config/sumcheck/config.toml`, if any. Never creates files or directories.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sumcheck")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from disk; built-in defaults when no file exists.
pub fn load() -> Result<SumcheckConfig> {
    match config_path()? {
        Some(path) => load_at(&path),
        None => Ok(SumcheckConfig::default()),
    }
}

/// Same as `load` for an explicit path. Values are clamped into range.
pub fn load_at(path: &Path) -> Result<SumcheckConfig> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(SumcheckConfig::default());
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SumcheckConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg.clamped())
}
