//! Scanner module — walks a root directory and partitions its files.
//!
//! Two entry points with the same traversal underneath:
//!
//! - [`scan`] — synchronous; progress via a plain callback. Suits tests
//!   and callers that already run off the main thread.
//! - [`start_scan`] — spawns a scanner thread and returns a [`ScanHandle`]
//!   whose crossbeam channel delivers [`ScanProgress`] messages to a
//!   single consumer, with cooperative cancellation. This is the path the
//!   [`SearchEngine`](crate::engine::SearchEngine) uses.

pub mod classify;
pub mod progress;
mod walk;

pub use classify::{is_text_candidate, MAX_TEXT_FILE_SIZE};
pub use progress::{ProgressReporter, ScanProgress, SilentReporter};

pub(crate) use walk::absolutize;

use crate::error::ScanError;
use crate::model::ScanResult;
use crossbeam_channel::Receiver;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::warn;
use walk::WalkEvent;

/// Maximum number of progress messages that may queue up in the channel.
///
/// Consumers drain continuously, so the bound is generous; it exists so a
/// stalled consumer applies back-pressure to the scan thread instead of
/// growing an unbounded queue.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 1_024;

/// Handle to a running or completed scan. Allows cancellation and
/// receiving progress updates.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread. The terminal
    /// message is always one of `Complete`, `Failed`, or `Cancelled`.
    pub progress_rx: Receiver<ScanProgress>,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the scan thread.
    _thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Scan `root` synchronously.
///
/// `on_progress` is invoked with the running file count every 50 files
/// and once more with the final count. Unreadable subdirectories are
/// logged and skipped; only a failure on the root itself is an error.
pub fn scan(root: &Path, mut on_progress: impl FnMut(usize)) -> Result<ScanResult, ScanError> {
    let cancel = AtomicBool::new(false);
    walk::scan_root(root, &cancel, &mut |event| match event {
        WalkEvent::Progress { files_seen } => on_progress(files_seen),
        WalkEvent::Skipped { path, message } => {
            warn!(path = ?path, %message, "skipping unreadable entry");
        }
    })
}

/// Start a new scan on a background thread.
///
/// Returns a [`ScanHandle`] for receiving progress and requesting
/// cancellation. The thread always sends a terminal message before
/// exiting, even on failure.
pub fn start_scan(root: PathBuf) -> ScanHandle {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel = cancel_flag.clone();

    let thread = thread::Builder::new()
        .name("filescout-scanner".into())
        .spawn(move || {
            let start = Instant::now();
            let outcome = walk::scan_root(&root, &cancel, &mut |event| {
                let message = match event {
                    WalkEvent::Progress { files_seen } => ScanProgress::Update { files_seen },
                    WalkEvent::Skipped { path, message } => ScanProgress::Skipped { path, message },
                };
                let _ = progress_tx.send(message);
            });

            let terminal = match outcome {
                Ok(result) => ScanProgress::Complete {
                    result,
                    duration: start.elapsed(),
                },
                Err(ScanError::Cancelled) => ScanProgress::Cancelled,
                Err(error) => ScanProgress::Failed { error },
            };
            let _ = progress_tx.send(terminal);
        })
        .expect("failed to spawn scanner thread");

    ScanHandle {
        progress_rx,
        cancel_flag,
        _thread: Some(thread),
    }
}
