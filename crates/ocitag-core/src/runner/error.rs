//! Runner error types.

use std::io;

use thiserror::Error;

use super::Completed;

#[derive(Debug, Error)]
pub enum RunError {
    /// The executable could not be located in PATH.
    #[error("executable {name:?} not found in PATH")]
    NotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    /// The process could not be started at all.
    #[error("failed to launch {}", .command.join(" "))]
    Launch {
        command: Vec<String>,
        #[source]
        source: io::Error,
    },

    /// The process exited with a non-zero code while `check` was enabled.
    /// Carries the exit code and both captured outputs for diagnostics.
    #[error("command {} exited with code {}; stderr: {}", .0.command.join(" "), .0.exit_code, .0.stderr.trim_end())]
    Failed(Completed),
}
