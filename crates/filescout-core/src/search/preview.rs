//! Preview extraction — highlighted context snippets around content
//! matches, for showing a user why a file was found.

use super::read_to_string_lossy;
use crate::model::Snippet;
use std::path::Path;

/// Marker placed before a matched substring.
pub const HIGHLIGHT_PREFIX: &str = "--> ";
/// Marker placed after a matched substring.
pub const HIGHLIGHT_SUFFIX: &str = " <--";

/// Extract up to `max_snippets` highlighted context windows from `path`.
///
/// Lines are scanned in order; a line matches when any keyword is a
/// case-insensitive substring. Each match yields the window
/// `[i - context_lines, i + context_lines]` clamped to the file, with
/// every keyword occurrence in every window line wrapped in the marker
/// pair. Line numbers are 1-based. Unreadable files yield an empty vec.
pub fn extract_previews(
    path: &Path,
    keywords: &[String],
    context_lines: usize,
    max_snippets: usize,
) -> Vec<Snippet> {
    let lowered: Vec<String> = keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();

    let mut snippets = Vec::new();
    if lowered.is_empty() || max_snippets == 0 {
        return snippets;
    }
    let Some(content) = read_to_string_lossy(path) else {
        return snippets;
    };

    let lines: Vec<&str> = content.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        let low = line.to_lowercase();
        if !lowered.iter().any(|keyword| low.contains(keyword.as_str())) {
            continue;
        }

        let start = i.saturating_sub(context_lines);
        let end = (i + context_lines + 1).min(lines.len());
        snippets.push(Snippet {
            line_number: i + 1,
            lines: lines[start..end]
                .iter()
                .map(|context_line| highlight_line(context_line, &lowered))
                .collect(),
        });

        if snippets.len() >= max_snippets {
            break;
        }
    }
    snippets
}

/// Wrap every keyword occurrence in `line` with the highlight markers.
///
/// Occurrences are collected across all keywords; when two overlap, the
/// earliest-starting (and on ties, shortest) span wins and the overlapped
/// one is dropped, so markers never nest.
fn highlight_line(line: &str, keywords_lower: &[String]) -> String {
    let mut ranges: Vec<(usize, usize)> = keywords_lower
        .iter()
        .flat_map(|keyword| match_ranges(line, keyword))
        .collect();
    if ranges.is_empty() {
        return line.to_string();
    }
    ranges.sort_unstable();

    let mut out = String::with_capacity(line.len() + 16);
    let mut cursor = 0;
    for (start, end) in ranges {
        if start < cursor {
            continue;
        }
        out.push_str(&line[cursor..start]);
        out.push_str(HIGHLIGHT_PREFIX);
        out.push_str(&line[start..end]);
        out.push_str(HIGHLIGHT_SUFFIX);
        cursor = end;
    }
    out.push_str(&line[cursor..]);
    out
}

/// Byte ranges of every case-insensitive occurrence of `needle_lower`.
fn match_ranges(line: &str, needle_lower: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    if needle_lower.is_empty() {
        return ranges;
    }
    for (start, _) in line.char_indices() {
        if let Some(len) = ci_match_len(&line[start..], needle_lower) {
            ranges.push((start, start + len));
        }
    }
    ranges
}

/// If `haystack` starts with `needle_lower` (case-insensitively), return
/// how many bytes of `haystack` the match covers.
///
/// Comparison lower-cases the haystack character by character, so the
/// returned length indexes the *original* string even when lower-casing
/// changes byte lengths. A needle that ends in the middle of a one-to-many
/// lowercase expansion does not match.
fn ci_match_len(haystack: &str, needle_lower: &str) -> Option<usize> {
    let mut needle = needle_lower.chars();
    let mut pending = needle.next();
    let mut consumed = 0;

    for c in haystack.chars() {
        for folded in c.to_lowercase() {
            match pending {
                Some(expected) if expected == folded => pending = needle.next(),
                _ => return None,
            }
        }
        consumed += c.len_utf8();
        if pending.is_none() {
            return Some(consumed);
        }
    }
    None
}
