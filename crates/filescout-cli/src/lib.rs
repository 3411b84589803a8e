//! FileScout CLI — command dispatch and output formatting.
//!
//! All engine work happens in `filescout-core`; this crate parses
//! arguments, renders progress, and prints results.

pub mod commands;
mod progress;

use anyhow::Context;
use clap::Parser;
use commands::{Cli, Commands};
use filescout_core::search::extract_previews;
use filescout_core::{organise, scanner, ProgressReporter, SearchEngine, SearchQuery};
use progress::CliReporter;
use std::path::Path;
use std::sync::atomic::AtomicBool;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { root, json } => run_scan(&root, json),
        Commands::Search {
            root,
            name,
            content,
            mode,
            json,
        } => run_search(&root, name, content, mode, json),
        Commands::Preview {
            path,
            keywords,
            context,
            max_snippets,
            json,
        } => run_preview(&path, &keywords, context, max_snippets, json),
        Commands::Organise {
            folder,
            no_categories,
            no_extensions,
            dry_run,
            json,
        } => run_organise(&folder, no_categories, no_extensions, dry_run, json),
    }
}

fn run_scan(root: &Path, json: bool) -> anyhow::Result<()> {
    let reporter = CliReporter::new();
    reporter.on_scan_start();
    let started = std::time::Instant::now();
    let result = scanner::scan(root, |files_seen| reporter.on_scan_progress(files_seen))
        .with_context(|| format!("scanning {}", root.display()))?;
    reporter.on_scan_complete(
        result.all_files.len(),
        result.text_files.len(),
        started.elapsed().as_secs_f64(),
    );

    if json {
        let summary = serde_json::json!({
            "root": result.root,
            "total_files": result.all_files.len(),
            "text_files": result.text_files.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{}: {} files, {} text candidates",
            result.root.display(),
            result.all_files.len(),
            result.text_files.len()
        );
    }
    Ok(())
}

fn run_search(
    root: &Path,
    name: Option<String>,
    content: Vec<String>,
    mode: commands::MatchMode,
    json: bool,
) -> anyhow::Result<()> {
    let query = SearchQuery {
        name_keyword: name,
        content_keywords: content,
        mode: mode.into(),
    };

    let cancel = AtomicBool::new(false);
    let reporter = CliReporter::new();
    let mut engine = SearchEngine::new();
    let outcome = engine
        .search(root, &query, &cancel, &reporter)
        .with_context(|| format!("searching {}", root.display()))?;

    if json {
        let out = serde_json::json!({
            "root": root,
            "hits": outcome.hits,
            "files_scanned": outcome.files_scanned,
            "duration_secs": outcome.duration.as_secs_f64(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if outcome.hits.is_empty() {
        println!("No results.");
    } else {
        for (idx, path) in outcome.hits.iter().enumerate() {
            println!("[{}] {}", idx + 1, path.display());
        }
    }
    println!(
        "{} result(s) from {} file(s) in {:.2}s",
        outcome.hits.len(),
        outcome.files_scanned,
        outcome.duration.as_secs_f64()
    );
    Ok(())
}

fn run_preview(
    path: &Path,
    keywords: &[String],
    context: usize,
    max_snippets: usize,
    json: bool,
) -> anyhow::Result<()> {
    let snippets = extract_previews(path, keywords, context, max_snippets);

    if json {
        println!("{}", serde_json::to_string_pretty(&snippets)?);
        return Ok(());
    }

    if snippets.is_empty() {
        println!("No matches found in {}.", path.display());
        return Ok(());
    }
    for snippet in &snippets {
        println!("Line {}:", snippet.line_number);
        for line in &snippet.lines {
            println!("  {line}");
        }
        println!();
    }
    Ok(())
}

fn run_organise(
    folder: &Path,
    no_categories: bool,
    no_extensions: bool,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<()> {
    let options = organise::OrganiseOptions {
        by_category: !no_categories,
        by_extension: !no_extensions,
    };

    if dry_run {
        let moves = organise::plan(folder, options)
            .with_context(|| format!("planning organise of {}", folder.display()))?;
        if json {
            println!("{}", serde_json::to_string_pretty(&moves)?);
            return Ok(());
        }
        for planned in &moves {
            println!(
                "[PLAN] {} -> {}",
                planned.source.display(),
                planned.dest_dir.display()
            );
        }
        println!("{} file(s) would be moved", moves.len());
        return Ok(());
    }

    let report = organise::organise(folder, options)
        .with_context(|| format!("organising {}", folder.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for moved in &report.moved {
            println!(
                "[OK] {} -> {}",
                moved.from.display(),
                moved.to.display()
            );
        }
        for failed in &report.failed {
            eprintln!("[FAIL] {}: {}", failed.path.display(), failed.reason);
        }
        println!(
            "{} file(s) moved, {} failed",
            report.moved.len(),
            report.failed.len()
        );
    }

    if !report.failed.is_empty() {
        tracing::warn!(
            failed = report.failed.len(),
            moved = report.moved.len(),
            "organise completed partially"
        );
        anyhow::bail!("{} file(s) could not be moved", report.failed.len());
    }
    Ok(())
}
