//! Wrapper for calling oras in a subprocess.

use std::path::{Path, PathBuf};

use crate::imageref::ImageRef;
use crate::runner::{LogOpts, RunError, Tool};

pub struct Oras {
    tool: Tool,
}

impl Oras {
    /// Use oras from PATH.
    pub fn find() -> Result<Self, RunError> {
        Ok(Self {
            tool: Tool::find("oras")?,
        })
    }

    /// Use oras at an explicit path (config override).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            tool: Tool::new(path),
        }
    }

    /// `oras push`: push `file` to `dest` (a `repo:tag` ref) as an OCI
    /// artifact of the given type. Runs from the file's parent directory
    /// so the artifact layer title is the bare file name, not a local
    /// filesystem path.
    pub fn push(&self, dest: &ImageRef, artifact_type: &str, file: &Path) -> Result<(), RunError> {
        let cwd = file.parent().filter(|p| !p.as_os_str().is_empty());
        let file_name = file.file_name().map(Path::new).unwrap_or(file);
        self.tool.run_logged(
            push_args(dest, artifact_type, file_name),
            LogOpts {
                cwd: cwd.map(Path::to_path_buf),
                ..LogOpts::default()
            },
        )?;
        Ok(())
    }
}

fn push_args(dest: &ImageRef, artifact_type: &str, file_name: &Path) -> Vec<String> {
    vec![
        "push".to_string(),
        "--artifact-type".to_string(),
        artifact_type.to_string(),
        dest.to_string(),
        file_name.display().to_string(),
    ]
}
