//! Full-text content search over text-candidate files.
//!
//! Files are independent, so the work fans out over a fixed-size rayon
//! pool. The only shared state is the hit accumulator (behind a mutex)
//! and the completion counter (atomic); per-file reads never touch
//! shared data.

use super::read_to_string_lossy;
use crate::model::SearchMode;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::warn;

/// Fixed size of the content-search worker pool.
///
/// Bounds concurrent open file handles and in-memory file bodies
/// regardless of how many candidates the scan produced.
pub const CONTENT_WORKERS: usize = 20;

/// Progress is reported every this many completed files, plus a final
/// `(total, total)` call.
const CONTENT_REPORT_INTERVAL: usize = 5;

/// Search the bodies of `text_files` for `keywords`.
///
/// Keywords are lower-cased once up front; matching is plain
/// case-insensitive substring containment against the lower-cased full
/// content of each file. `And` requires every keyword, `Or` at least one.
/// Files that cannot be read are excluded silently. `on_progress` is
/// invoked from worker threads in completion order, which is
/// non-deterministic. The result is sorted.
///
/// Cancellation is honoured at each file boundary: remaining files are
/// skipped, and the caller decides whether the partial result is usable.
pub fn search_contents(
    keywords: &[String],
    text_files: &[PathBuf],
    mode: SearchMode,
    cancel: &AtomicBool,
    on_progress: &(dyn Fn(usize, usize) + Sync),
) -> Vec<PathBuf> {
    let lowered: Vec<String> = keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    if lowered.is_empty() {
        return Vec::new();
    }

    let total = text_files.len();
    let completed = AtomicUsize::new(0);
    let hits: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

    let run = || {
        text_files.par_iter().for_each(|path| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }

            if let Some(content) = read_to_string_lossy(path) {
                let haystack = content.to_lowercase();
                let matched = match mode {
                    SearchMode::And => {
                        lowered.iter().all(|keyword| haystack.contains(keyword.as_str()))
                    }
                    SearchMode::Or => {
                        lowered.iter().any(|keyword| haystack.contains(keyword.as_str()))
                    }
                };
                if matched {
                    hits.lock().push(path.clone());
                }
            }

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if done.is_multiple_of(CONTENT_REPORT_INTERVAL) {
                on_progress(done, total);
            }
        });
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(CONTENT_WORKERS)
        .thread_name(|i| format!("filescout-search-{i}"))
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(err) => {
            // Fall back to the global pool rather than failing the search.
            warn!(error = %err, "could not build content-search pool");
            run();
        }
    }

    on_progress(total, total);

    let mut found = hits.into_inner();
    found.sort_unstable();
    found
}
