//! CLI command handlers. Each command is in its own file.

mod apply_tags;
mod push_containerfile;

pub use apply_tags::run_apply_tags;
pub use push_containerfile::{run_push_containerfile, PushContainerfileArgs};

use anyhow::Result;
use ocitag_core::config::OcitagConfig;
use ocitag_core::tools::{Oras, Skopeo};

/// Skopeo from the configured path, or from PATH.
fn skopeo(cfg: &OcitagConfig) -> Result<Skopeo> {
    Ok(match &cfg.skopeo_path {
        Some(path) => Skopeo::at(path),
        None => Skopeo::find()?,
    })
}

/// Oras from the configured path, or from PATH.
fn oras(cfg: &OcitagConfig) -> Result<Oras> {
    Ok(match &cfg.oras_path {
        Some(path) => Oras::at(path),
        None => Oras::find()?,
    })
}
