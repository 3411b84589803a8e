//! Filename search — case-insensitive substring match over basenames.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Search `all_files` for `keyword`.
///
/// A file matches when the keyword is a case-insensitive substring of its
/// basename, or of its parent directory's basename — matching a folder
/// name pulls in the files under it. The result is sorted and free of
/// duplicates.
pub fn search_names(keyword: &str, all_files: &[PathBuf]) -> Vec<PathBuf> {
    let needle = keyword.to_lowercase();
    let mut hits: BTreeSet<PathBuf> = BTreeSet::new();

    for path in all_files {
        if basename_contains(path, &needle)
            || path.parent().is_some_and(|dir| basename_contains(dir, &needle))
        {
            hits.insert(path.clone());
        }
    }

    hits.into_iter().collect()
}

fn basename_contains(path: &Path, needle_lower: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .is_some_and(|name| name.contains(needle_lower))
}
