//! Bounded worker pool: threads pull entries from a shared queue and send
//! results back to the caller over a channel.

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use crate::manifest::ManifestEntry;
use crate::report::Reporter;

use super::{verify_entry, VerificationResult, VerifyOptions, VerifySummary};

/// Run all entries with `opts.workers` threads. The caller's thread is the
/// only one that touches `reporter`.
pub(super) fn run_pool(
    entries: Vec<ManifestEntry>,
    source_folder: &Path,
    opts: &VerifyOptions,
    reporter: &mut dyn Reporter,
) -> Result<VerifySummary> {
    let mut summary = VerifySummary::default();
    let count = entries.len();
    if count == 0 {
        return Ok(summary);
    }

    let work: Arc<Mutex<VecDeque<ManifestEntry>>> =
        Arc::new(Mutex::new(entries.into_iter().collect()));
    let abort = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel::<VerificationResult>();
    let num_workers = opts.workers.max(1).min(count);
    let mut handles = Vec::with_capacity(num_workers);
    for worker in 0..num_workers {
        let work = Arc::clone(&work);
        let abort = Arc::clone(&abort);
        let tx = tx.clone();
        let folder: PathBuf = source_folder.to_path_buf();
        let buf_size = opts.buffer_bytes;
        let handle = std::thread::Builder::new()
            .name(format!("sumcheck-worker-{}", worker))
            .spawn(move || loop {
                if abort.load(Ordering::Relaxed) {
                    break;
                }
                let entry = match work.lock().unwrap().pop_front() {
                    Some(e) => e,
                    None => break,
                };
                let result = verify_entry(&entry, &folder, buf_size);
                if tx.send(result).is_err() {
                    break;
                }
            })
            .context("spawn verification worker")?;
        handles.push(handle);
    }
    drop(tx);

    let mut first_error: Option<anyhow::Error> = None;
    let mut to_receive = count;
    while to_receive > 0 {
        let result = match rx.recv() {
            Ok(r) => r,
            Err(_) => {
                first_error = Some(anyhow::anyhow!(
                    "worker result channel closed (worker may have panicked)"
                ));
                break;
            }
        };
        to_receive -= 1;
        tracing::debug!(line = result.line, status = %result.status, "entry verified");
        summary.record(&result.status);
        if let Err(e) = reporter.report(&result) {
            first_error = Some(anyhow::Error::new(e).context("write verification result"));
            abort.store(true, Ordering::Relaxed);
            if let Ok(mut q) = work.lock() {
                q.clear();
            }
            break;
        }
    }
    // Unblock any worker still sending so the joins below cannot hang.
    drop(rx);

    for h in handles {
        if h.join().is_err() && first_error.is_none() {
            first_error = Some(anyhow::anyhow!("verification worker panicked"));
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(summary),
    }
}
