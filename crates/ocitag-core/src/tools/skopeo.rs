//! Wrapper for calling skopeo in a subprocess.

use std::path::PathBuf;

use crate::imageref::ImageRef;
use crate::runner::{LogOpts, RunError, Tool};

pub struct Skopeo {
    tool: Tool,
}

impl Skopeo {
    /// Use skopeo from PATH.
    pub fn find() -> Result<Self, RunError> {
        Ok(Self {
            tool: Tool::find("skopeo")?,
        })
    }

    /// Use skopeo at an explicit path (config override).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            tool: Tool::new(path),
        }
    }

    /// `skopeo copy --all`: copies every architecture of a manifest list.
    pub fn copy_all(&self, source: &ImageRef, dest: &ImageRef) -> Result<(), RunError> {
        self.tool
            .run_logged(copy_args(source, dest), LogOpts::default())?;
        Ok(())
    }

    /// `skopeo inspect --format`, returning the raw stdout.
    pub fn inspect_format(&self, image: &ImageRef, format: &str) -> Result<String, RunError> {
        let proc = self
            .tool
            .run_logged(inspect_args(image, format), LogOpts::default())?;
        Ok(proc.stdout)
    }
}

fn copy_args(source: &ImageRef, dest: &ImageRef) -> Vec<String> {
    vec![
        "copy".to_string(),
        "--all".to_string(),
        format!("docker://{}", adjust(source)),
        format!("docker://{dest}"),
    ]
}

fn inspect_args(image: &ImageRef, format: &str) -> Vec<String> {
    vec![
        "inspect".to_string(),
        "--no-tags".to_string(),
        "--format".to_string(),
        format.to_string(),
        format!("docker://{}", adjust(image)),
    ]
}

/// skopeo rejects refs carrying both a tag and a digest; keep the digest.
fn adjust(image: &ImageRef) -> ImageRef {
    if image.digest.is_some() {
        image.without_tag()
    } else {
        tracing::warn!("image ref has no digest, this may be unreliable: {image}");
        image.clone()
    }
}
