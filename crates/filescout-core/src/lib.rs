//! FileScout Core — scanning, search, and organisation engine.
//!
//! This crate contains all business logic with zero UI dependencies.
//! It is designed to be reusable across different front-ends (CLI, GUI, TUI).
//!
//! # Modules
//!
//! - [`model`] — Value objects: scan results, queries, snippets.
//! - [`scanner`] — Directory walking and text-candidate classification,
//!   with channel-based progress and cancellation.
//! - [`search`] — Filename search, concurrent content search, previews,
//!   and result merging.
//! - [`organise`] — Category/extension folder organisation.
//! - [`engine`] — Session orchestration with scan caching.
//! - [`error`] — Typed failures for each operation.

pub mod engine;
pub mod error;
pub mod model;
pub mod organise;
pub mod scanner;
pub mod search;

pub use engine::{SearchEngine, SearchOutcome};
pub use error::{OrganiseError, QueryError, ScanError, SearchError};
pub use model::{ScanResult, SearchMode, SearchQuery, Snippet};
pub use scanner::{ProgressReporter, SilentReporter};
