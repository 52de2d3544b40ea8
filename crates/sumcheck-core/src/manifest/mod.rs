//! Manifest parsing: one `<file> <algorithm> <digest>` triple per line.
//!
//! Fields are separated by runs of spaces and may be double-quoted (see
//! `fields`). Blank lines are skipped; any other line must have exactly three
//! non-empty fields or the whole parse fails.

mod error;
mod fields;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub use error::ManifestError;

/// One expected-checksum record from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// 1-based line number in the manifest.
    pub line: usize,
    /// File name relative to the source folder.
    pub file_name: String,
    /// Algorithm token as written; resolved when the entry is verified.
    pub algorithm: String,
    /// Expected digest, compared verbatim against the computed hex digest.
    pub expected_digest: String,
}

/// Open and parse a manifest file.
pub fn parse_manifest(path: &Path) -> Result<Vec<ManifestEntry>, ManifestError> {
    let f = File::open(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_manifest_reader(BufReader::new(f)).map_err(|e| match e {
        ManifestError::Io { source, .. } => ManifestError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    tracing::debug!(
        path = %path.display(),
        entries = entries.len(),
        "parsed manifest"
    );
    Ok(entries)
}

/// Parse manifest text, preserving line order.
///
/// I/O errors from the reader are reported with an empty path; `parse_manifest`
/// fills in the real one.
pub fn parse_manifest_reader<R: BufRead>(reader: R) -> Result<Vec<ManifestEntry>, ManifestError> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ManifestError::Io {
            path: Default::default(),
            source,
        })?;
        if let Some(entry) = parse_line(idx + 1, &line)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Returns `Ok(None)` for a blank line.
fn parse_line(line_no: usize, line: &str) -> Result<Option<ManifestEntry>, ManifestError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let fields = fields::split_fields(line).map_err(|_| ManifestError::UnterminatedQuote {
        line: line_no,
        content: line.trim().to_string(),
    })?;
    match <[String; 3]>::try_from(fields) {
        Ok([file_name, algorithm, expected_digest])
            if !file_name.is_empty() && !algorithm.is_empty() && !expected_digest.is_empty() =>
        {
            Ok(Some(ManifestEntry {
                line: line_no,
                file_name,
                algorithm,
                expected_digest,
            }))
        }
        Ok(_) => Err(ManifestError::EmptyField {
            line: line_no,
            content: line.trim().to_string(),
        }),
        Err(fields) => Err(ManifestError::Format {
            line: line_no,
            content: line.trim().to_string(),
            fields: fields.len(),
        }),
    }
}

#[cfg(test)]
mod tests;
