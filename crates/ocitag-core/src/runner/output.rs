//! Completed-process result.

/// Result of running a tool to completion: the exit code plus the full
/// text captured from both output streams.
///
/// Constructed once, after the process has exited and both streams have
/// been read to end-of-stream, so `stdout` and `stderr` reflect every line
/// the process produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    /// The command as invoked: executable followed by its arguments.
    pub command: Vec<String>,
    /// Process exit code (`-1` when terminated by a signal).
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}
