//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use filescout_core::SearchMode;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "filescout")]
#[command(about = "Find, preview, and organise files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a directory and report file and text-candidate counts
    Scan {
        /// Directory to scan
        root: PathBuf,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search by file name and/or content keywords
    Search {
        /// Directory to search under
        root: PathBuf,
        /// Substring to match against file and folder names
        #[arg(long)]
        name: Option<String>,
        /// Content keyword; repeat for multiple keywords
        #[arg(long = "content", value_name = "KEYWORD")]
        content: Vec<String>,
        /// How multiple content keywords combine
        #[arg(long, value_enum, default_value_t = MatchMode::And)]
        mode: MatchMode,
        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print highlighted context snippets for keyword matches in one file
    Preview {
        /// File to preview
        path: PathBuf,
        /// Keyword to highlight; repeat for multiple keywords
        #[arg(short, long = "keyword", value_name = "KEYWORD", required = true)]
        keywords: Vec<String>,
        /// Context lines shown around each match
        #[arg(long, default_value_t = 1)]
        context: usize,
        /// Maximum number of snippets to show
        #[arg(long, default_value_t = 3)]
        max_snippets: usize,
        /// Emit snippets as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a folder's files into a category/extension hierarchy
    #[command(alias = "organize")]
    Organise {
        /// Folder whose immediate children will be organised
        folder: PathBuf,
        /// Do not create per-category folders
        #[arg(long)]
        no_categories: bool,
        /// Do not create per-extension subfolders
        #[arg(long)]
        no_extensions: bool,
        /// Show the planned moves without touching any file
        #[arg(long)]
        dry_run: bool,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// CLI spelling of [`SearchMode`].
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatchMode {
    /// Every keyword must appear
    And,
    /// At least one keyword must appear
    Or,
}

impl From<MatchMode> for SearchMode {
    fn from(mode: MatchMode) -> Self {
        match mode {
            MatchMode::And => SearchMode::And,
            MatchMode::Or => SearchMode::Or,
        }
    }
}
