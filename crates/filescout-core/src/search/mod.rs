//! Search module — filename search, concurrent content search, preview
//! snippets, and the merge policy that combines them.

pub mod content;
pub mod name;
pub mod preview;

pub use content::{search_contents, CONTENT_WORKERS};
pub use name::search_names;
pub use preview::{extract_previews, HIGHLIGHT_PREFIX, HIGHLIGHT_SUFFIX};

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Combine name and content results according to which criteria ran.
///
/// Both → sorted union; one → that one (already sorted by its producer);
/// neither → empty. The empty case is rejected earlier by
/// [`SearchQuery::validate`](crate::model::SearchQuery::validate); handling
/// it here keeps the function total.
pub fn merge_results(
    name_hits: Option<Vec<PathBuf>>,
    content_hits: Option<Vec<PathBuf>>,
) -> Vec<PathBuf> {
    match (name_hits, content_hits) {
        (Some(name), Some(content)) => {
            let union: BTreeSet<PathBuf> = name.into_iter().chain(content).collect();
            union.into_iter().collect()
        }
        (Some(name), None) => name,
        (None, Some(content)) => content,
        (None, None) => Vec::new(),
    }
}

/// Read a whole file as text, tolerating non-UTF-8 bytes via lossy
/// decoding. I/O failures exclude the file (`None`), never propagate.
pub(crate) fn read_to_string_lossy(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "skipping unreadable file");
            None
        }
    }
}
