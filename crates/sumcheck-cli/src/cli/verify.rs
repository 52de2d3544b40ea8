//! Verify command: parse the manifest, then check every entry.

use anyhow::{Context, Result};
use std::path::Path;
use sumcheck_core::config::SumcheckConfig;
use sumcheck_core::manifest;
use sumcheck_core::report::Reporter;
use sumcheck_core::verify::{self, VerifyOptions, VerifySummary};

/// A bad manifest is returned as an error before any entry is reported.
pub fn run_verify(
    manifest_path: &Path,
    source_folder: &Path,
    cfg: &SumcheckConfig,
    reporter: &mut dyn Reporter,
) -> Result<VerifySummary> {
    let entries = manifest::parse_manifest(manifest_path)
        .with_context(|| format!("load manifest {}", manifest_path.display()))?;
    tracing::info!(
        manifest = %manifest_path.display(),
        entries = entries.len(),
        "manifest loaded"
    );
    verify::verify_all(entries, source_folder, &VerifyOptions::from(cfg), reporter)
}
