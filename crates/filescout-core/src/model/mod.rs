//! Data model for the FileScout engine.
//!
//! Value objects passed by ownership between components — there is no
//! shared mutable state between the scanner, the searchers, and their
//! callers.

use crate::error::QueryError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The outcome of a full recursive scan of one root directory.
///
/// Invalidated (must be recomputed) whenever the root changes; the
/// [`SearchEngine`](crate::engine::SearchEngine) handles this caching.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Absolutised scan root.
    pub root: PathBuf,

    /// Every regular file found under the root, in traversal order.
    ///
    /// Traversal order is platform directory order and not stable across
    /// runs; consumers that need ordering sort their own output.
    pub all_files: Vec<PathBuf>,

    /// The subset of `all_files` judged likely to contain decodable text.
    pub text_files: Vec<PathBuf>,
}

impl ScanResult {
    /// Whether this result was produced for the given (absolutised) root.
    pub fn is_for_root(&self, root: &Path) -> bool {
        self.root == root
    }
}

/// Combination policy for multiple content keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SearchMode {
    /// Every keyword must appear in the file content.
    #[default]
    And,
    /// At least one keyword must appear in the file content.
    Or,
}

/// The criteria for one search run.
///
/// At least one of the name keyword or the content keywords must be
/// non-empty after trimming for the query to be valid.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Substring to match against file and folder basenames.
    pub name_keyword: Option<String>,

    /// Keywords to match against file contents.
    pub content_keywords: Vec<String>,

    /// How multiple content keywords combine.
    pub mode: SearchMode,
}

impl SearchQuery {
    /// The name keyword with surrounding whitespace removed, if any remains.
    pub fn name_keyword(&self) -> Option<&str> {
        self.name_keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// The content keywords, trimmed, with empty entries dropped.
    pub fn content_keywords(&self) -> Vec<&str> {
        self.content_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Reject queries that would match nothing before any I/O happens.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.name_keyword().is_none() && self.content_keywords().is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(())
    }
}

/// A highlighted context window around one content match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    /// 1-based line number of the matching line.
    pub line_number: usize,

    /// The context window, each line with matches wrapped in highlight
    /// markers.
    pub lines: Vec<String>,
}
