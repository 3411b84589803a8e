//! Error types for the FileScout engine.
//!
//! Only failures that abort a whole operation are modelled here. Per-file
//! problems (an unreadable file during classification, content search, or
//! preview) are recovered locally by excluding the file and never surface
//! as an error value.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A scan could not run to completion.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("scan root does not exist: {0}")]
    RootNotFound(PathBuf),

    /// The scan root exists but could not be read (typically permissions).
    #[error("cannot read scan root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The scan root is not a directory.
    #[error("scan root is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The scan was cancelled via its cancellation flag.
    #[error("scan was cancelled")]
    Cancelled,

    /// The scanner thread terminated without sending a terminal message.
    #[error("scanner thread terminated unexpectedly")]
    WorkerLost,
}

/// A search query with no usable criteria.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Neither a name keyword nor any content keyword was supplied.
    #[error("search needs a file-name keyword or at least one content keyword")]
    Empty,
}

/// A search could not run to completion.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The search was cancelled via its cancellation flag.
    #[error("search was cancelled")]
    Cancelled,
}

/// An organise run could not start.
///
/// Failures moving individual files are reported in
/// [`OrganiseReport::failed`](crate::organise::OrganiseReport) rather than
/// aborting the remaining moves.
#[derive(Debug, Error)]
pub enum OrganiseError {
    /// The organise target is not a directory.
    #[error("organise target is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The organise target could not be listed.
    #[error("cannot read organise target {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
