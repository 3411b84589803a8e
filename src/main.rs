//! FileScout — file discovery and organisation toolkit.
//!
//! Thin binary entry point. All logic lives in the `filescout-core`
//! and `filescout-cli` crates.

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging. Progress and results go to stdout;
    // diagnostics stay on stderr and default to warnings unless RUST_LOG
    // says otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    filescout_cli::run()
}
