//! Subprocess execution with live line streaming.
//!
//! Runs an external tool with piped stdout/stderr, drains both pipes on
//! independent threads, and returns the full captured output once the
//! process has exited and both streams hit end-of-stream. Sequentially
//! reading stdout and then stderr would deadlock as soon as the unread
//! pipe's OS buffer fills while the process blocks writing to it; one
//! thread per stream, each owning its own accumulation buffer, avoids that
//! without any locking.
//!
//! Output is decoded as lossy UTF-8, one newline-terminated line at a time
//! (the final line may be unterminated). No shell is involved: arguments
//! are passed as discrete tokens.

mod error;
mod output;

pub use error::RunError;
pub use output::Completed;

use std::ffi::{OsStr, OsString};
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use tracing::Level;

/// Per-stream line callback. Receives each complete line (trailing newline
/// included) in emission order. There is no ordering guarantee between the
/// two streams, only within one.
pub type LineSink<'a> = Box<dyn FnMut(&str) + Send + 'a>;

/// Options for [`Tool::run_with`].
pub struct RunOpts<'a> {
    /// Fail with [`RunError::Failed`] on a non-zero exit code.
    pub check: bool,
    /// Working directory for the child process.
    pub cwd: Option<PathBuf>,
    pub on_stdout: Option<LineSink<'a>>,
    pub on_stderr: Option<LineSink<'a>>,
}

impl Default for RunOpts<'_> {
    fn default() -> Self {
        Self {
            check: true,
            cwd: None,
            on_stdout: None,
            on_stderr: None,
        }
    }
}

/// Options for [`Tool::run_logged`]. A `None` level suppresses logging for
/// that stream while still collecting it.
pub struct LogOpts {
    pub check: bool,
    pub cwd: Option<PathBuf>,
    pub stdout_level: Option<Level>,
    pub stderr_level: Option<Level>,
}

impl Default for LogOpts {
    fn default() -> Self {
        Self {
            check: true,
            cwd: None,
            stdout_level: Some(Level::DEBUG),
            stderr_level: Some(Level::ERROR),
        }
    }
}

/// Wrapper for calling an external CLI tool in a subprocess.
///
/// Holds an already-located executable path; resolution by name goes
/// through [`Tool::find`]. The runner never retries internally — retry is
/// a composed outer layer (see [`crate::retry`]).
#[derive(Debug, Clone)]
pub struct Tool {
    executable: PathBuf,
}

impl Tool {
    /// Wrap an explicit executable path.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Locate an executable in PATH.
    pub fn find(name: &str) -> Result<Self, RunError> {
        let executable = which::which(name).map_err(|source| RunError::NotFound {
            name: name.to_string(),
            source,
        })?;
        Ok(Self { executable })
    }

    /// Base name of the executable, used to tag logged output lines.
    pub fn name(&self) -> &str {
        self.executable
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("tool")
    }

    /// Run the tool, capturing stdout and stderr. Equivalent to
    /// `run_with(args, RunOpts::default())`: check enabled, no callbacks.
    pub fn run<I, S>(&self, args: I) -> Result<Completed, RunError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.run_with(args, RunOpts::default())
    }

    /// Run the tool, capturing stdout and stderr while streaming each line
    /// to the per-stream callbacks in real time.
    pub fn run_with<I, S>(&self, args: I, opts: RunOpts<'_>) -> Result<Completed, RunError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let command: Vec<String> = std::iter::once(self.executable.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        tracing::debug!("running {command:?}");

        let mut cmd = Command::new(&self.executable);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &opts.cwd {
            cmd.current_dir(cwd);
        }

        let mut child = cmd.spawn().map_err(|source| RunError::Launch {
            command: command.clone(),
            source,
        })?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let (stdout, stderr) = thread::scope(|scope| {
            let out = scope.spawn(|| drain(stdout_pipe, opts.on_stdout));
            let err = scope.spawn(|| drain(stderr_pipe, opts.on_stderr));
            (
                out.join().unwrap_or_default(),
                err.join().unwrap_or_default(),
            )
        });

        let status = child.wait().map_err(|source| RunError::Launch {
            command: command.clone(),
            source,
        })?;

        let completed = Completed {
            command,
            exit_code: status.code().unwrap_or(-1),
            stdout,
            stderr,
        };

        if opts.check && completed.exit_code != 0 {
            return Err(RunError::Failed(completed));
        }
        Ok(completed)
    }

    /// Same as [`Tool::run_with`] but special-cased for the common use
    /// case of log+collect: each line of stdout and stderr is logged in
    /// real time, tagged with the tool and stream name
    /// (`skopeo stdout> ...`), while still being collected for later use.
    pub fn run_logged<I, S>(&self, args: I, opts: LogOpts) -> Result<Completed, RunError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let stdout_sink = opts.stdout_level.map(|level| {
            let tag = format!("{} stdout", self.name());
            Box::new(move |line: &str| log_line(level, &tag, line)) as LineSink
        });
        let stderr_sink = opts.stderr_level.map(|level| {
            let tag = format!("{} stderr", self.name());
            Box::new(move |line: &str| log_line(level, &tag, line)) as LineSink
        });

        self.run_with(
            args,
            RunOpts {
                check: opts.check,
                cwd: opts.cwd,
                on_stdout: stdout_sink,
                on_stderr: stderr_sink,
            },
        )
    }
}

/// Read a pipe to end-of-stream, invoking the sink per line and returning
/// the accumulated text. Read errors terminate the stream; the output seen
/// so far is kept.
fn drain<R: Read>(pipe: Option<R>, mut sink: Option<LineSink<'_>>) -> String {
    let Some(pipe) = pipe else {
        return String::new();
    };
    let mut reader = BufReader::new(pipe);
    let mut collected = String::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if let Some(sink) = sink.as_mut() {
                    sink(&line);
                }
                collected.push_str(&line);
            }
        }
    }
    collected
}

/// Log one output line at a runtime-chosen level. `tracing` event macros
/// take a const level, hence the match.
fn log_line(level: Level, tag: &str, line: &str) {
    let line = line.strip_suffix('\n').unwrap_or(line);
    match level {
        Level::TRACE => tracing::trace!("{tag}> {line}"),
        Level::DEBUG => tracing::debug!("{tag}> {line}"),
        Level::INFO => tracing::info!("{tag}> {line}"),
        Level::WARN => tracing::warn!("{tag}> {line}"),
        Level::ERROR => tracing::error!("{tag}> {line}"),
    }
}
