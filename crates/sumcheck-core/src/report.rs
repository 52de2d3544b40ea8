//! Rendering verification results as output lines.

use std::io::{self, Write};

use crate::verify::VerificationResult;

/// Sink for per-entry results. The dispatcher calls it from a single thread.
pub trait Reporter {
    fn report(&mut self, result: &VerificationResult) -> io::Result<()>;
}

/// Writes `<path> <STATUS>` lines, flushing after each one.
pub struct LineReporter<W: Write> {
    out: W,
}

impl<W: Write> LineReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter for LineReporter<W> {
    fn report(&mut self, result: &VerificationResult) -> io::Result<()> {
        writeln!(self.out, "{}", result)?;
        self.out.flush()
    }
}

/// Collects results in completion order.
impl Reporter for Vec<VerificationResult> {
    fn report(&mut self, result: &VerificationResult) -> io::Result<()> {
        self.push(result.clone());
        Ok(())
    }
}
