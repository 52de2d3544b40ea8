//! Error types for manifest parsing.

use std::io;
use std::path::PathBuf;

/// Manifest could not be read or contains a malformed line. Fatal to the whole run.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A non-blank line did not split into exactly three fields.
    #[error("invalid manifest line {line}: `{content}` (expected 3 fields, found {fields})")]
    Format {
        line: usize,
        content: String,
        fields: usize,
    },

    /// Three fields, but at least one of them is empty (e.g. `""`).
    #[error("invalid manifest line {line}: `{content}` (empty field)")]
    EmptyField { line: usize, content: String },

    /// A double-quoted field is not closed before the end of the line.
    #[error("invalid manifest line {line}: `{content}` (unterminated quote)")]
    UnterminatedQuote { line: usize, content: String },
}
