//! End-to-end engine integration tests.
//!
//! These tests exercise the real scanner, searchers, and organiser against
//! a real temporary filesystem, verifying classification, the search
//! predicates and their merge policy, progress reporting through the
//! channel, and the folder reorganisation contract.
//!
//! **Why a `tests/` integration test (not unit test)?**
//!
//! The scanner creates real OS threads and walks actual directory entries,
//! and the organiser renames real files. Testing those in isolation would
//! require mocking the filesystem; an integration test with `tempfile`
//! exercises every code path with zero mocking.

use filescout_core::engine::SearchEngine;
use filescout_core::error::{QueryError, ScanError, SearchError};
use filescout_core::model::{SearchMode, SearchQuery};
use filescout_core::organise::{self, OrganiseOptions};
use filescout_core::scanner::{self, is_text_candidate, ScanProgress, PROGRESS_CHANNEL_CAPACITY};
use filescout_core::search::extract_previews;
use filescout_core::SilentReporter;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Create a reproducible directory tree for search tests:
///
/// ```text
/// root/
///   docs/
///     report.pdf   (plain text: "quarterly budget figures")
///     notes.txt    ("the budget plan for next year")
///   img/
///     photo.jpg    (binary: contains null bytes)
/// ```
fn build_search_tree(root: &Path) {
    let docs = root.join("docs");
    let img = root.join("img");
    fs::create_dir_all(&docs).unwrap();
    fs::create_dir_all(&img).unwrap();

    fs::write(docs.join("report.pdf"), "quarterly budget figures").unwrap();
    fs::write(docs.join("notes.txt"), "the budget plan for next year").unwrap();
    fs::write(img.join("photo.jpg"), b"\x89JPG\x00\x00binary\x00data").unwrap();
}

fn no_cancel() -> AtomicBool {
    AtomicBool::new(false)
}

fn path_set(paths: &[PathBuf]) -> BTreeSet<PathBuf> {
    paths.iter().cloned().collect()
}

/// Drain all progress messages from a scan handle, returning the final
/// `ScanResult` (or panicking after a generous timeout).
fn drain_to_completion(handle: scanner::ScanHandle) -> filescout_core::ScanResult {
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    loop {
        assert!(
            std::time::Instant::now() < deadline,
            "scanner did not complete within 30 seconds"
        );
        match handle.progress_rx.try_recv() {
            Ok(ScanProgress::Complete { result, .. }) => return result,
            Ok(ScanProgress::Cancelled) => panic!("scan was unexpectedly cancelled"),
            Ok(ScanProgress::Failed { error }) => panic!("scan failed: {error}"),
            Ok(_) => continue,
            Err(crossbeam_channel::TryRecvError::Empty) => {
                std::thread::sleep(Duration::from_millis(10));
            }
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                panic!("scanner channel disconnected before a terminal message");
            }
        }
    }
}

// ── Classification ───────────────────────────────────────────────────────────

/// An empty file is a text candidate; null bytes in the probe are not.
#[test]
fn classify_empty_and_binary_files() {
    let tmp = TempDir::new().unwrap();

    let empty = tmp.path().join("empty.txt");
    fs::write(&empty, "").unwrap();
    assert!(is_text_candidate(&empty));

    let binary = tmp.path().join("blob.bin");
    fs::write(&binary, b"abc\x00def").unwrap();
    assert!(!is_text_candidate(&binary));
}

/// UTF-8 and single-byte (Latin-1 style) content both qualify.
#[test]
fn classify_accepts_utf8_and_latin1() {
    let tmp = TempDir::new().unwrap();

    let utf8 = tmp.path().join("utf8.txt");
    fs::write(&utf8, "ordinary text with unicode: déjà vu").unwrap();
    assert!(is_text_candidate(&utf8));

    // 0xE9 is 'é' in Latin-1 but not valid UTF-8 on its own.
    let latin1 = tmp.path().join("latin1.txt");
    fs::write(&latin1, b"caf\xE9 au lait").unwrap();
    assert!(is_text_candidate(&latin1));
}

/// Files over the size threshold fail closed, as do missing files.
#[test]
fn classify_rejects_oversized_and_missing() {
    let tmp = TempDir::new().unwrap();

    // A sparse file reports its logical length without writing 50 MiB.
    let huge = tmp.path().join("huge.log");
    let file = fs::File::create(&huge).unwrap();
    file.set_len(scanner::MAX_TEXT_FILE_SIZE + 1).unwrap();
    assert!(!is_text_candidate(&huge));

    assert!(!is_text_candidate(&tmp.path().join("no-such-file.txt")));
}

// ── Scanning ─────────────────────────────────────────────────────────────────

/// The scan partitions files into all/text lists with text ⊆ all.
#[test]
fn scan_partitions_text_candidates() {
    let tmp = TempDir::new().unwrap();
    build_search_tree(tmp.path());

    let result = scanner::scan(tmp.path(), |_| {}).unwrap();

    assert_eq!(result.all_files.len(), 3);
    assert_eq!(result.text_files.len(), 2);
    let all = path_set(&result.all_files);
    let text = path_set(&result.text_files);
    assert!(text.is_subset(&all));
    assert!(!text.iter().any(|p| p.ends_with("photo.jpg")));
}

/// Re-running a scan on an unchanged tree yields identical sets.
#[test]
fn scan_is_idempotent_as_sets() {
    let tmp = TempDir::new().unwrap();
    build_search_tree(tmp.path());

    let first = scanner::scan(tmp.path(), |_| {}).unwrap();
    let second = scanner::scan(tmp.path(), |_| {}).unwrap();

    assert_eq!(path_set(&first.all_files), path_set(&second.all_files));
    assert_eq!(path_set(&first.text_files), path_set(&second.text_files));
}

/// The progress callback always fires once more with the final count.
#[test]
fn scan_reports_final_count() {
    let tmp = TempDir::new().unwrap();
    for i in 0..60 {
        fs::write(tmp.path().join(format!("file{i:03}.txt")), "x").unwrap();
    }

    let mut counts = Vec::new();
    let result = scanner::scan(tmp.path(), |files_seen| counts.push(files_seen)).unwrap();

    assert_eq!(counts.last(), Some(&result.all_files.len()));
    // The periodic update at 50 fires before the final one at 60.
    assert!(counts.contains(&50));
    assert!(counts.windows(2).all(|w| w[0] <= w[1]));
}

/// A missing root is a fatal scan error, not an empty result.
#[test]
fn scan_missing_root_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope");

    match scanner::scan(&missing, |_| {}) {
        Err(ScanError::RootNotFound(path)) => assert!(path.ends_with("nope")),
        other => panic!("expected RootNotFound, got {other:?}"),
    }
}

/// A root that is a file, not a directory, is rejected up front.
#[test]
fn scan_file_root_fails() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("plain.txt");
    fs::write(&file, "not a directory").unwrap();

    assert!(matches!(
        scanner::scan(&file, |_| {}),
        Err(ScanError::NotADirectory(_))
    ));
}

/// The channel-based scanner delivers Update messages and a Complete
/// terminal carrying the result.
#[test]
fn start_scan_reports_progress_and_completes() {
    let tmp = TempDir::new().unwrap();
    for i in 0..120 {
        fs::write(tmp.path().join(format!("file{i:03}.txt")), "data").unwrap();
    }

    let handle = scanner::start_scan(tmp.path().to_path_buf());
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    let mut saw_update = false;
    let result = loop {
        assert!(
            std::time::Instant::now() < deadline,
            "scanner timed out without a terminal message"
        );
        match handle.progress_rx.try_recv() {
            Ok(ScanProgress::Update { files_seen }) if files_seen > 0 => saw_update = true,
            Ok(ScanProgress::Complete { result, .. }) => break result,
            Ok(ScanProgress::Failed { error }) => panic!("scan failed: {error}"),
            Ok(_) => continue,
            Err(crossbeam_channel::TryRecvError::Empty) => {
                std::thread::sleep(Duration::from_millis(5));
            }
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                panic!("channel disconnected before a terminal message");
            }
        }
    };

    assert!(saw_update, "expected at least one Update for 120 files");
    assert_eq!(result.all_files.len(), 120);
}

/// Cancellation must terminate the scan gracefully with a terminal message.
#[test]
fn start_scan_cancellation_sends_terminal_message() {
    let tmp = TempDir::new().unwrap();
    build_search_tree(tmp.path());

    let handle = scanner::start_scan(tmp.path().to_path_buf());
    // The scanner may already be done by the time the flag is read, so we
    // accept either Cancelled or Complete.
    handle.cancel();

    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    let mut received_terminal = false;
    while std::time::Instant::now() < deadline {
        match handle.progress_rx.try_recv() {
            Ok(ScanProgress::Cancelled) | Ok(ScanProgress::Complete { .. }) => {
                received_terminal = true;
                break;
            }
            Ok(_) => continue,
            Err(crossbeam_channel::TryRecvError::Empty) => {
                std::thread::sleep(Duration::from_millis(5));
            }
            Err(crossbeam_channel::TryRecvError::Disconnected) => break,
        }
    }
    assert!(
        received_terminal,
        "scanner must send Cancelled or Complete within 30 s"
    );
}

/// `PROGRESS_CHANNEL_CAPACITY` must be positive so `send()` never blocks
/// immediately. Compile-time invariant.
const _: () = assert!(
    PROGRESS_CHANNEL_CAPACITY > 0,
    "PROGRESS_CHANNEL_CAPACITY must be > 0"
);

// ── Search engine ────────────────────────────────────────────────────────────

/// The headline scenario: a folder-name match pulls in the files under it,
/// AND narrows to files containing every keyword, OR widens to any.
#[test]
fn engine_runs_name_and_content_search() {
    let tmp = TempDir::new().unwrap();
    build_search_tree(tmp.path());
    let mut engine = SearchEngine::new();

    // Name search: "doc" matches the docs folder, pulling in both files.
    let name_query = SearchQuery {
        name_keyword: Some("doc".into()),
        ..Default::default()
    };
    let outcome = engine
        .search(tmp.path(), &name_query, &no_cancel(), &SilentReporter)
        .unwrap();
    assert_eq!(outcome.hits.len(), 2);
    assert!(outcome.hits.iter().all(|p| p.parent().unwrap().ends_with("docs")));
    assert_eq!(outcome.files_scanned, 3);

    // Content AND: only notes.txt has both keywords.
    let and_query = SearchQuery {
        content_keywords: vec!["budget".into(), "plan".into()],
        mode: SearchMode::And,
        ..Default::default()
    };
    let outcome = engine
        .search(tmp.path(), &and_query, &no_cancel(), &SilentReporter)
        .unwrap();
    assert_eq!(outcome.hits.len(), 1);
    assert!(outcome.hits[0].ends_with("notes.txt"));

    // Content OR: both text candidates mention "budget".
    let or_query = SearchQuery {
        content_keywords: vec!["budget".into(), "plan".into()],
        mode: SearchMode::Or,
        ..Default::default()
    };
    let outcome = engine
        .search(tmp.path(), &or_query, &no_cancel(), &SilentReporter)
        .unwrap();
    assert_eq!(outcome.hits.len(), 2);

    // Name + content: union of both result sets.
    let both_query = SearchQuery {
        name_keyword: Some("photo".into()),
        content_keywords: vec!["plan".into()],
        mode: SearchMode::And,
    };
    let outcome = engine
        .search(tmp.path(), &both_query, &no_cancel(), &SilentReporter)
        .unwrap();
    let hits = path_set(&outcome.hits);
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().any(|p| p.ends_with("photo.jpg")));
    assert!(hits.iter().any(|p| p.ends_with("notes.txt")));
}

/// A query with no criteria is rejected before any I/O.
#[test]
fn engine_rejects_empty_query() {
    let tmp = TempDir::new().unwrap();
    let mut engine = SearchEngine::new();

    let outcome = engine.search(
        tmp.path(),
        &SearchQuery::default(),
        &no_cancel(),
        &SilentReporter,
    );
    assert!(matches!(
        outcome,
        Err(SearchError::Query(QueryError::Empty))
    ));
    // Nothing was scanned for the invalid query.
    assert!(engine.cached_scan().is_none());
}

/// The engine re-uses its cached scan for an unchanged root and re-walks
/// after `invalidate()`.
#[test]
fn engine_caches_scan_until_invalidated() {
    let tmp = TempDir::new().unwrap();
    build_search_tree(tmp.path());
    let mut engine = SearchEngine::new();

    let query = SearchQuery {
        name_keyword: Some("notes".into()),
        ..Default::default()
    };
    let first = engine
        .search(tmp.path(), &query, &no_cancel(), &SilentReporter)
        .unwrap();
    assert_eq!(first.files_scanned, 3);

    // Delete a file behind the engine's back: the cached scan still
    // reports it, proving no re-walk happened.
    fs::remove_file(tmp.path().join("img").join("photo.jpg")).unwrap();
    let cached = engine
        .search(tmp.path(), &query, &no_cancel(), &SilentReporter)
        .unwrap();
    assert_eq!(cached.files_scanned, 3);

    engine.invalidate();
    let fresh = engine
        .search(tmp.path(), &query, &no_cancel(), &SilentReporter)
        .unwrap();
    assert_eq!(fresh.files_scanned, 2);
}

/// A pre-set cancellation flag aborts the search.
#[test]
fn engine_honours_cancellation() {
    let tmp = TempDir::new().unwrap();
    build_search_tree(tmp.path());
    let mut engine = SearchEngine::new();

    let cancel = AtomicBool::new(true);
    let query = SearchQuery {
        name_keyword: Some("doc".into()),
        ..Default::default()
    };
    let outcome = engine.search(tmp.path(), &query, &cancel, &SilentReporter);
    assert!(matches!(outcome, Err(SearchError::Cancelled)));
}

// ── Preview ──────────────────────────────────────────────────────────────────

/// Previews cap at `max_snippets`, use 1-based line numbers, and wrap
/// matches in the highlight markers.
#[test]
fn preview_extracts_highlighted_windows() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("log.txt");
    fs::write(
        &file,
        "intro line\nfirst budget mention\nmiddle line\nsecond budget mention\nanother line\nthird budget mention\nfourth budget mention\n",
    )
    .unwrap();

    let snippets = extract_previews(&file, &["budget".to_string()], 1, 3);

    assert_eq!(snippets.len(), 3, "must stop at max_snippets");
    assert_eq!(snippets[0].line_number, 2);
    // Context of one line on each side.
    assert_eq!(
        snippets[0].lines,
        vec![
            "intro line".to_string(),
            "first --> budget <-- mention".to_string(),
            "middle line".to_string(),
        ]
    );
    // Every snippet's window contains the keyword in un-highlighted form
    // once the markers are stripped.
    for snippet in &snippets {
        let joined = snippet.lines.join("\n").replace("--> ", "").replace(" <--", "");
        assert!(joined.to_lowercase().contains("budget"));
    }
}

/// A match on the first line clamps the window at the top of the file.
#[test]
fn preview_clamps_window_at_file_start() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("top.txt");
    fs::write(&file, "budget on line one\nsecond line\n").unwrap();

    let snippets = extract_previews(&file, &["budget".to_string()], 1, 3);
    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0].line_number, 1);
    assert_eq!(snippets[0].lines.len(), 2);
}

/// Unreadable files yield an empty sequence rather than an error.
#[test]
fn preview_of_missing_file_is_empty() {
    let tmp = TempDir::new().unwrap();
    let snippets = extract_previews(
        &tmp.path().join("ghost.txt"),
        &["anything".to_string()],
        1,
        3,
    );
    assert!(snippets.is_empty());
}

// ── Organiser ────────────────────────────────────────────────────────────────

/// Category-only grouping: files land under their category label,
/// subdirectories stay untouched.
#[test]
fn organise_groups_by_category() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.jpg"), "x").unwrap();
    fs::write(tmp.path().join("b.mp3"), "x").unwrap();
    let untouched = tmp.path().join("subdir");
    fs::create_dir(&untouched).unwrap();
    fs::write(untouched.join("inner.txt"), "x").unwrap();

    let report = organise::organise(
        tmp.path(),
        OrganiseOptions {
            by_category: true,
            by_extension: false,
        },
    )
    .unwrap();

    assert_eq!(report.moved.len(), 2);
    assert!(report.failed.is_empty());
    let organised = tmp.path().join("ORGANIZED FILES");
    assert!(organised.join("Images").join("a.jpg").is_file());
    assert!(organised.join("Audio").join("b.mp3").is_file());
    // The subdirectory and its contents were not recursed into or moved.
    assert!(untouched.join("inner.txt").is_file());
}

/// Full grouping adds the per-extension subfolder; unknown extensions go
/// to the fallback category and extensionless files stop at the category.
#[test]
fn organise_groups_by_category_and_extension() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Photo.JPG"), "x").unwrap();
    fs::write(tmp.path().join("weird.zzz"), "x").unwrap();
    fs::write(tmp.path().join("README"), "x").unwrap();

    let report = organise::organise(tmp.path(), OrganiseOptions::default()).unwrap();
    assert_eq!(report.moved.len(), 3);

    let organised = tmp.path().join("ORGANIZED FILES");
    assert!(organised.join("Images").join(".jpg").join("Photo.JPG").is_file());
    assert!(organised.join("Other").join(".zzz").join("weird.zzz").is_file());
    assert!(organised.join("Other").join("README").is_file());
}

/// A destination collision picks a numeric suffix instead of overwriting.
#[test]
fn organise_resolves_collisions_with_suffix() {
    let tmp = TempDir::new().unwrap();
    let dest_dir = tmp.path().join("ORGANIZED FILES").join("Images");
    fs::create_dir_all(&dest_dir).unwrap();
    fs::write(dest_dir.join("a.jpg"), "already organised").unwrap();
    fs::write(tmp.path().join("a.jpg"), "newcomer").unwrap();

    let report = organise::organise(
        tmp.path(),
        OrganiseOptions {
            by_category: true,
            by_extension: false,
        },
    )
    .unwrap();

    assert_eq!(report.moved.len(), 1);
    assert_eq!(report.moved[0].to, dest_dir.join("a (1).jpg"));
    assert_eq!(
        fs::read_to_string(dest_dir.join("a.jpg")).unwrap(),
        "already organised"
    );
    assert_eq!(
        fs::read_to_string(dest_dir.join("a (1).jpg")).unwrap(),
        "newcomer"
    );
}

/// Planning reports the same destinations without moving anything.
#[test]
fn organise_plan_is_side_effect_free() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.jpg"), "x").unwrap();

    let moves = organise::plan(
        tmp.path(),
        OrganiseOptions {
            by_category: true,
            by_extension: false,
        },
    )
    .unwrap();

    assert_eq!(moves.len(), 1);
    assert!(moves[0]
        .dest_dir
        .ends_with(Path::new("ORGANIZED FILES").join("Images")));
    // The source file has not moved.
    assert!(tmp.path().join("a.jpg").is_file());
    assert!(!tmp.path().join("ORGANIZED FILES").exists());
}

/// Organising a missing target is a fatal error, not an empty report.
#[test]
fn organise_missing_target_fails() {
    let tmp = TempDir::new().unwrap();
    let result = organise::organise(&tmp.path().join("nope"), OrganiseOptions::default());
    assert!(matches!(
        result,
        Err(filescout_core::OrganiseError::NotADirectory(_))
    ));
}

// ── Channel scan result reuse ────────────────────────────────────────────────

/// `drain_to_completion` helper round-trip: the result delivered over the
/// channel matches a synchronous scan of the same tree.
#[test]
fn channel_and_sync_scans_agree() {
    let tmp = TempDir::new().unwrap();
    build_search_tree(tmp.path());

    let channel_result = drain_to_completion(scanner::start_scan(tmp.path().to_path_buf()));
    let sync_result = scanner::scan(tmp.path(), |_| {}).unwrap();

    assert_eq!(
        path_set(&channel_result.all_files),
        path_set(&sync_result.all_files)
    );
    assert_eq!(
        path_set(&channel_result.text_files),
        path_set(&sync_result.text_files)
    );
}
