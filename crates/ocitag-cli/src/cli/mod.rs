//! CLI for ocitag.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ocitag_core::config;
use ocitag_core::imageref::ImageRef;
use std::path::PathBuf;

use commands::{run_apply_tags, run_push_containerfile, PushContainerfileArgs};

/// Top-level CLI for ocitag.
#[derive(Debug, Parser)]
#[command(name = "ocitag")]
#[command(about = "ocitag: apply tags and attach build files to OCI images", long_about = None)]
pub struct Cli {
    /// Default log level for ocitag output (RUST_LOG overrides).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Apply additional tags to an image already pushed to a registry.
    ///
    /// Tags come from --tags and from the image's `ocitag.additional-tags`
    /// label (a space-or-comma separated list).
    ApplyTags {
        /// Tags to apply.
        #[arg(long, required = true, num_args = 1..)]
        tags: Vec<String>,

        /// Image to tag, preferably pinned by digest.
        #[arg(long)]
        to_image: ImageRef,
    },

    /// Discover the build file for an image and attach it to the registry
    /// as an OCI artifact.
    PushContainerfile {
        /// Root of the source checkout.
        #[arg(long, default_value = ".")]
        source: PathBuf,

        /// Build context directory, relative to --source.
        #[arg(long, default_value = ".")]
        context: PathBuf,

        /// Explicit build file path, relative to --source.
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Image the build file belongs to, preferably pinned by digest.
        #[arg(long)]
        for_image: ImageRef,

        /// Artifact type recorded in the OCI manifest.
        #[arg(long, default_value = "application/vnd.ocitag.containerfile")]
        artifact_type: String,

        /// Suffix of the artifact tag derived from the image digest.
        #[arg(long, default_value = ".containerfile")]
        tag_suffix: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::ApplyTags { tags, to_image } => run_apply_tags(&cfg, &tags, &to_image),
            CliCommand::PushContainerfile {
                source,
                context,
                file,
                for_image,
                artifact_type,
                tag_suffix,
            } => run_push_containerfile(
                &cfg,
                &PushContainerfileArgs {
                    source,
                    context,
                    file,
                    for_image,
                    artifact_type,
                    tag_suffix,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests;
