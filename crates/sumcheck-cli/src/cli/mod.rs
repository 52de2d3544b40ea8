//! CLI for sumcheck: `sumcheck <MANIFEST> <SOURCE_FOLDER>`.

mod verify;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use sumcheck_core::config::{self, SumcheckConfig};
use sumcheck_core::report::LineReporter;
use sumcheck_core::verify::VerifySummary;

pub use verify::run_verify;

/// Verify files against a manifest of expected checksums.
#[derive(Debug, Parser)]
#[command(name = "sumcheck", version)]
#[command(about = "Verify files against a checksum manifest", long_about = None)]
pub struct Cli {
    /// Manifest file with `<file> <md5|sha1|sha256> <hex digest>` lines.
    pub manifest: PathBuf,

    /// Folder the manifest's file names are relative to.
    pub source_folder: PathBuf,
}

/// Why the command line could not be turned into a `Cli`.
#[derive(Debug)]
pub enum UsageError {
    /// Wrong number of positional parameters.
    ArgumentCount { given: usize },
    /// Help/version requests and unknown flags; clap prints and exits on its own.
    Clap(clap::Error),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::ArgumentCount { given } => write!(
                f,
                "Unexpected count of input parameters: expected 2, got {}",
                given
            ),
            UsageError::Clap(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for UsageError {}

/// Parse the full argv (program name first).
///
/// A missing or surplus positional becomes `ArgumentCount`; anything else
/// (help, version, unknown flags) is left to clap.
pub fn parse_from<I, T>(args: I) -> Result<Cli, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let given = args.len().saturating_sub(1);
    let has_flag = args.iter().skip(1).any(|a| looks_like_flag(a));
    Cli::try_parse_from(args).map_err(|err| match err.kind() {
        ErrorKind::MissingRequiredArgument => UsageError::ArgumentCount { given },
        ErrorKind::UnknownArgument if !has_flag => UsageError::ArgumentCount { given },
        _ => UsageError::Clap(err),
    })
}

fn looks_like_flag(arg: &OsString) -> bool {
    let s = arg.to_string_lossy();
    s.len() > 1 && s.starts_with('-')
}

impl Cli {
    pub fn usage() -> String {
        Cli::command().render_usage().to_string()
    }

    /// Load config, parse the manifest and verify every entry, printing one
    /// line per entry to stdout.
    pub fn run(self) -> Result<VerifySummary> {
        let cfg = config::load().unwrap_or_else(|e| {
            tracing::warn!("config unavailable, using defaults: {:#}", e);
            SumcheckConfig::default()
        });
        tracing::debug!("loaded config: {:?}", cfg);

        let mut reporter = LineReporter::stdout();
        run_verify(&self.manifest, &self.source_folder, &cfg, &mut reporter)
    }
}

#[cfg(test)]
mod tests;
