//! Progress reporting — messages sent from the scan thread over a
//! crossbeam channel, and the hook trait front-ends implement to render
//! progress for the blocking engine API.

use crate::error::ScanError;
use crate::model::ScanResult;
use std::path::PathBuf;
use std::time::Duration;

/// Progress updates sent from the scan thread to its consumer.
///
/// The channel carries only lightweight counters until the terminal
/// message; `Complete` hands the finished [`ScanResult`] to the consumer
/// by value.
#[derive(Debug)]
pub enum ScanProgress {
    /// Periodic update with the running file count.
    Update { files_seen: usize },
    /// A non-fatal error (e.g. permission denied on one subdirectory).
    Skipped {
        path: Option<PathBuf>,
        message: String,
    },
    /// Scanning completed successfully.
    Complete {
        result: ScanResult,
        duration: Duration,
    },
    /// Scanning aborted on a fatal error (root inaccessible).
    Failed { error: ScanError },
    /// Scan was cancelled by the consumer.
    Cancelled,
}

/// Hooks invoked by the blocking [`SearchEngine`](crate::engine::SearchEngine)
/// as work progresses.
///
/// All methods have default no-op implementations; implementations must be
/// thread-safe because content-search progress is reported from worker
/// threads.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self) {}
    fn on_scan_progress(&self, _files_seen: usize) {}
    fn on_scan_complete(&self, _total_files: usize, _text_files: usize, _duration_secs: f64) {}
    fn on_content_search_start(&self, _total_files: usize) {}
    fn on_content_search_progress(&self, _completed: usize, _total: usize) {}
    fn on_content_search_complete(&self, _matches: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
