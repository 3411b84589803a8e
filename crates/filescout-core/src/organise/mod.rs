//! Flat-folder organiser — moves a folder's files into a
//! category/extension hierarchy under `ORGANIZED FILES`.
//!
//! Only immediate children are touched; subdirectories are neither
//! recursed into nor moved. The operation is not transactional: each file
//! either moves or is recorded as failed, and the report communicates the
//! partial outcome.

pub mod categories;

pub use categories::{categorise_extension, categorise_path, FileCategory};

use crate::error::OrganiseError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the destination folder created inside the organised directory.
pub const ORGANIZED_FILES_DIR: &str = "ORGANIZED FILES";

/// Grouping flags for one organise run.
#[derive(Debug, Clone, Copy)]
pub struct OrganiseOptions {
    /// Group files under a per-category folder.
    pub by_category: bool,
    /// Group files under a per-extension subfolder (named ".jpg", ".txt", …).
    pub by_extension: bool,
}

impl Default for OrganiseOptions {
    fn default() -> Self {
        Self {
            by_category: true,
            by_extension: true,
        }
    }
}

/// One planned move: a source file and the directory it will land in.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedMove {
    pub source: PathBuf,
    pub dest_dir: PathBuf,
    pub category: FileCategory,
}

/// A file that was successfully moved.
#[derive(Debug, Clone, Serialize)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
    pub category: FileCategory,
}

/// A file that could not be moved, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct FailedMove {
    pub path: PathBuf,
    pub dest: PathBuf,
    pub reason: String,
}

/// Outcome of one organise run. `failed` being non-empty means partial
/// completion; the moves in `moved` have already happened.
#[derive(Debug, Default, Serialize)]
pub struct OrganiseReport {
    pub moved: Vec<MovedFile>,
    pub failed: Vec<FailedMove>,
}

/// Compute the moves an organise run would perform, without touching any
/// file. Powers dry-run output.
///
/// Entries that cannot be inspected are skipped with a warning; the plan
/// is sorted by source path for stable output.
pub fn plan(folder: &Path, options: OrganiseOptions) -> Result<Vec<PlannedMove>, OrganiseError> {
    if !folder.is_dir() {
        return Err(OrganiseError::NotADirectory(folder.to_path_buf()));
    }
    let entries = fs::read_dir(folder).map_err(|source| OrganiseError::Unreadable {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut moves = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(folder = %folder.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "skipping entry");
                continue;
            }
        };
        // Subdirectories (including a previous ORGANIZED FILES) stay put.
        if file_type.is_dir() {
            continue;
        }

        let source = entry.path();
        let category = categorise_path(&source);

        let mut dest_dir = folder.join(ORGANIZED_FILES_DIR);
        if options.by_category {
            dest_dir.push(category.label());
        }
        if options.by_extension {
            if let Some(ext_folder) = extension_folder(&source) {
                dest_dir.push(ext_folder);
            }
        }

        moves.push(PlannedMove {
            source,
            dest_dir,
            category,
        });
    }

    moves.sort_by(|a, b| a.source.cmp(&b.source));
    Ok(moves)
}

/// Organise `folder`: move each immediate child file into its destination
/// directory, creating intermediate directories as needed.
///
/// A failure on one file is recorded and the remaining files are still
/// processed. Destination collisions are resolved by appending a numeric
/// suffix (`name (1).ext`) — existing files are never overwritten.
pub fn organise(folder: &Path, options: OrganiseOptions) -> Result<OrganiseReport, OrganiseError> {
    let moves = plan(folder, options)?;
    let mut report = OrganiseReport::default();

    for planned in moves {
        let Some(file_name) = planned.source.file_name().map(PathBuf::from) else {
            continue;
        };

        if let Err(err) = fs::create_dir_all(&planned.dest_dir) {
            report.failed.push(FailedMove {
                path: planned.source,
                dest: planned.dest_dir,
                reason: err.to_string(),
            });
            continue;
        }

        let dest = next_free_destination(&planned.dest_dir, &file_name);
        match fs::rename(&planned.source, &dest) {
            Ok(()) => {
                debug!(from = %planned.source.display(), to = %dest.display(), "moved");
                report.moved.push(MovedFile {
                    from: planned.source,
                    to: dest,
                    category: planned.category,
                });
            }
            Err(err) => report.failed.push(FailedMove {
                path: planned.source,
                dest,
                reason: err.to_string(),
            }),
        }
    }

    Ok(report)
}

/// Lowercased extension as a folder name, with its leading dot (".jpg").
fn extension_folder(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// First destination path in `dir` that does not collide with an existing
/// file: `a.jpg`, then `a (1).jpg`, `a (2).jpg`, …
fn next_free_destination(dir: &Path, file_name: &Path) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = file_name
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let ext = file_name.extension().map(|ext| ext.to_string_lossy());

    for n in 1u32.. {
        let name = match &ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("suffix space exhausted");
}
