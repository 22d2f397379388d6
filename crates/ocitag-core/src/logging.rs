//! Logging init: tracing to stderr, filterable via RUST_LOG or --log-level.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr.
///
/// `level` is the default filter for the ocitag crates (e.g. "info",
/// "debug"); an explicit RUST_LOG takes precedence. stderr is the right
/// sink for a pipeline-driven CLI: stdout stays reserved for command
/// output.
pub fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,ocitag_core={level},ocitag_cli={level},ocitag={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
