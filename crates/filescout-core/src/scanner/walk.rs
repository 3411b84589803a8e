//! Recursive directory walk feeding the text-candidate classifier.
//!
//! Uses `jwalk`'s rayon-backed parallel traversal for throughput; entries
//! are consumed on the calling thread, so progress events and the
//! cancellation check happen at every file boundary. Unreadable
//! subdirectories are skipped and reported; only a failure on the root
//! itself aborts the walk.

use super::classify::is_text_candidate;
use crate::error::ScanError;
use crate::model::ScanResult;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Progress is emitted every this many files processed, plus once more
/// with the final count when the walk completes.
pub(crate) const SCAN_REPORT_INTERVAL: usize = 50;

/// Events emitted while a walk is in flight.
pub(crate) enum WalkEvent {
    /// Running count of regular files processed so far.
    Progress { files_seen: usize },
    /// An entry that could not be read and was skipped.
    Skipped {
        path: Option<PathBuf>,
        message: String,
    },
}

/// Absolutise a path without touching the filesystem beyond the CWD lookup.
///
/// Deliberately not `canonicalize` — symlinked roots keep the spelling the
/// caller used, so results compare equal to paths the caller constructs.
pub(crate) fn absolutize(path: &Path) -> Result<PathBuf, ScanError> {
    std::path::absolute(path).map_err(|source| ScanError::RootUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Walk `root`, partitioning regular files into all/text-candidate lists.
pub(crate) fn scan_root(
    root: &Path,
    cancel: &AtomicBool,
    on_event: &mut dyn FnMut(WalkEvent),
) -> Result<ScanResult, ScanError> {
    let root = absolutize(root)?;

    let meta = fs::metadata(&root).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ScanError::RootNotFound(root.clone()),
        _ => ScanError::RootUnreadable {
            path: root.clone(),
            source,
        },
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory(root));
    }
    // Probe readability up front so a permission error on the root itself
    // fails the scan instead of silently yielding an empty result.
    fs::read_dir(&root).map_err(|source| ScanError::RootUnreadable {
        path: root.clone(),
        source,
    })?;

    let mut all_files = Vec::new();
    let mut text_files = Vec::new();
    let mut files_seen = 0usize;

    let walker = jwalk::WalkDir::new(&root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()));

    for entry_result in walker {
        if cancel.load(Ordering::Relaxed) {
            return Err(ScanError::Cancelled);
        }

        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                // jwalk errors are typically access-denied on directories;
                // skip the subtree and keep walking.
                on_event(WalkEvent::Skipped {
                    path: err.path().map(Path::to_path_buf),
                    message: err.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if is_text_candidate(&path) {
            text_files.push(path.clone());
        }
        all_files.push(path);

        files_seen += 1;
        if files_seen.is_multiple_of(SCAN_REPORT_INTERVAL) {
            on_event(WalkEvent::Progress { files_seen });
        }
    }

    if cancel.load(Ordering::Relaxed) {
        return Err(ScanError::Cancelled);
    }

    // Final count so short scans still report.
    on_event(WalkEvent::Progress { files_seen });

    Ok(ScanResult {
        root,
        all_files,
        text_files,
    })
}
