//! `ocitag push-containerfile` – discover the build file for an image and
//! attach it to the registry as an OCI artifact.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ocitag_core::config::OcitagConfig;
use ocitag_core::imageref::ImageRef;
use ocitag_core::retry::run_with_retry;
use ocitag_core::tools::transient;

pub struct PushContainerfileArgs {
    pub source: PathBuf,
    pub context: PathBuf,
    pub file: Option<PathBuf>,
    pub for_image: ImageRef,
    pub artifact_type: String,
    pub tag_suffix: String,
}

pub fn run_push_containerfile(cfg: &OcitagConfig, args: &PushContainerfileArgs) -> Result<()> {
    let containerfile = discover_containerfile(&args.source, &args.context, args.file.as_deref())?;
    tracing::info!("discovered build file at {}", containerfile.display());

    let oras = super::oras(cfg)?;
    let policy = cfg.retry_policy();

    let digest = match &args.for_image.digest {
        Some(digest) => digest.clone(),
        None => {
            let skopeo = super::skopeo(cfg)?;
            skopeo
                .inspect_format(&args.for_image, "{{ .Digest }}")
                .with_context(|| format!("failed to resolve digest of {}", args.for_image))?
                .trim()
                .to_string()
        }
    };

    let dest = args
        .for_image
        .without_digest()
        .with_tag(&artifact_tag(&digest, &args.tag_suffix));

    run_with_retry(&policy, transient, || {
        oras.push(&dest, &args.artifact_type, &containerfile)
    })
    .with_context(|| format!("failed to push {} to {dest}", containerfile.display()))?;

    println!("pushed {} to {dest}", containerfile.display());
    Ok(())
}

/// Tag under which the artifact is pushed: the image digest with `:`
/// flattened to `-`, plus the suffix. E.g. `sha256-deadbeef.containerfile`.
fn artifact_tag(digest: &str, suffix: &str) -> String {
    format!("{}{suffix}", digest.replace(':', "-"))
}

/// Locate the build file: an explicit `-f` wins, otherwise look for
/// `Containerfile` then `Dockerfile` in the build context.
fn discover_containerfile(source: &Path, context: &Path, file: Option<&Path>) -> Result<PathBuf> {
    if let Some(file) = file {
        let path = source.join(file);
        if !path.is_file() {
            bail!("build file {} does not exist", path.display());
        }
        return Ok(path);
    }

    let context_dir = source.join(context);
    for name in ["Containerfile", "Dockerfile"] {
        let candidate = context_dir.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    bail!(
        "no Containerfile or Dockerfile found in {}",
        context_dir.display()
    )
}
