//! Text-candidate classification.
//!
//! Decides whether a file is worth offering to the content searcher. The
//! heuristic is deliberately cheap: a size cap, a null-byte probe over the
//! first 2 KiB, and a decode attempt. Every I/O failure fails closed —
//! a file we cannot read is a file we cannot search.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Files larger than this are never text candidates, no matter their content.
pub const MAX_TEXT_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// How many leading bytes the classifier inspects.
const PROBE_SIZE: usize = 2048;

/// Classify `path` as a text candidate.
///
/// Returns `false` when the size cannot be determined, exceeds
/// [`MAX_TEXT_FILE_SIZE`], or any read fails. An empty file is a
/// candidate. A null byte in the probe marks the file binary. Valid UTF-8
/// passes; anything else falls through to a single-byte (Latin-1 style)
/// interpretation, in which every byte maps to a character.
pub fn is_text_candidate(path: &Path) -> bool {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(_) => return false,
    };
    if size > MAX_TEXT_FILE_SIZE {
        return false;
    }

    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let mut buf = [0u8; PROBE_SIZE];
    let mut filled = 0;
    loop {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => {
                filled += n;
                if filled == PROBE_SIZE {
                    break;
                }
            }
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => return false,
        }
    }

    let probe = &buf[..filled];
    if probe.is_empty() {
        return true;
    }
    if probe.contains(&0) {
        return false;
    }
    if std::str::from_utf8(probe).is_ok() {
        return true;
    }
    // The Latin-1 fallback accepts any byte sequence; the null-byte probe
    // above already rejected the binary case.
    true
}
