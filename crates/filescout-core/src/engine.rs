//! Search orchestration — scan caching, the two search phases, and result
//! merging.
//!
//! The engine owns the session-level state the components themselves stay
//! free of: the cached [`ScanResult`] for the last root, re-scanned only
//! when the root changes.

use crate::error::{ScanError, SearchError};
use crate::model::{ScanResult, SearchQuery};
use crate::scanner::progress::{ProgressReporter, ScanProgress};
use crate::scanner::{self, absolutize};
use crate::search::{merge_results, search_contents, search_names};
use crossbeam_channel::RecvTimeoutError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// The outcome of one search run.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Matching paths, sorted and deduplicated.
    pub hits: Vec<PathBuf>,
    /// How many files the underlying scan covered.
    pub files_scanned: usize,
    /// Wall-clock time for the whole run, including any re-scan.
    pub duration: Duration,
}

/// Orchestrates scanning and searching over one root at a time.
#[derive(Default)]
pub struct SearchEngine {
    cached: Option<ScanResult>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached scan so the next search re-walks the root.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// The cached scan, if one is held.
    pub fn cached_scan(&self) -> Option<&ScanResult> {
        self.cached.as_ref()
    }

    /// Run `query` against `root`.
    ///
    /// Re-scans only when `root` differs from the cached scan's root.
    /// Progress flows through `reporter`; setting `cancel` aborts at the
    /// next file boundary with [`SearchError::Cancelled`]. On error the
    /// previously cached scan is left untouched.
    pub fn search(
        &mut self,
        root: &Path,
        query: &SearchQuery,
        cancel: &AtomicBool,
        reporter: &dyn ProgressReporter,
    ) -> Result<SearchOutcome, SearchError> {
        query.validate()?;
        let start = Instant::now();

        let root = absolutize(root)?;
        if !self.cached.as_ref().is_some_and(|scan| scan.is_for_root(&root)) {
            let result = self.run_scan(root.clone(), cancel, reporter)?;
            self.cached = Some(result);
        }
        if cancel.load(Ordering::Relaxed) {
            return Err(SearchError::Cancelled);
        }
        // The cache is populated on every path that reaches this point.
        let scan = self.cached.as_ref().ok_or(ScanError::WorkerLost)?;

        let name_hits = query
            .name_keyword()
            .map(|keyword| search_names(keyword, &scan.all_files));

        let content_keywords = query.content_keywords();
        let content_hits = if content_keywords.is_empty() {
            None
        } else {
            let keywords: Vec<String> =
                content_keywords.iter().map(|k| k.to_string()).collect();
            let content_start = Instant::now();
            reporter.on_content_search_start(scan.text_files.len());
            let hits = search_contents(
                &keywords,
                &scan.text_files,
                query.mode,
                cancel,
                &|completed, total| reporter.on_content_search_progress(completed, total),
            );
            if cancel.load(Ordering::Relaxed) {
                return Err(SearchError::Cancelled);
            }
            reporter
                .on_content_search_complete(hits.len(), content_start.elapsed().as_secs_f64());
            Some(hits)
        };

        let hits = merge_results(name_hits, content_hits);
        let outcome = SearchOutcome {
            hits,
            files_scanned: scan.all_files.len(),
            duration: start.elapsed(),
        };
        info!(
            hits = outcome.hits.len(),
            files_scanned = outcome.files_scanned,
            "search finished in {:.2}s",
            outcome.duration.as_secs_f64()
        );
        Ok(outcome)
    }

    /// Run a scan through the channel-based scanner, forwarding progress
    /// to the reporter and honouring the caller's cancellation flag.
    fn run_scan(
        &self,
        root: PathBuf,
        cancel: &AtomicBool,
        reporter: &dyn ProgressReporter,
    ) -> Result<ScanResult, SearchError> {
        reporter.on_scan_start();
        let handle = scanner::start_scan(root);

        loop {
            if cancel.load(Ordering::Relaxed) && !handle.is_cancelled() {
                handle.cancel();
            }
            match handle.progress_rx.recv_timeout(Duration::from_millis(50)) {
                Ok(ScanProgress::Update { files_seen }) => reporter.on_scan_progress(files_seen),
                Ok(ScanProgress::Skipped { path, message }) => {
                    warn!(path = ?path, %message, "skipping unreadable entry during scan");
                }
                Ok(ScanProgress::Complete { result, duration }) => {
                    reporter.on_scan_complete(
                        result.all_files.len(),
                        result.text_files.len(),
                        duration.as_secs_f64(),
                    );
                    return Ok(result);
                }
                Ok(ScanProgress::Failed { error }) => return Err(error.into()),
                Ok(ScanProgress::Cancelled) => return Err(SearchError::Cancelled),
                Err(RecvTimeoutError::Timeout) => continue,
                // The scan thread never drops the sender before a terminal
                // message unless it panicked.
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(ScanError::WorkerLost.into())
                }
            }
        }
    }
}
