//! `ocitag apply-tags` – apply additional tags to a registry image.

use anyhow::{Context, Result};
use ocitag_core::config::OcitagConfig;
use ocitag_core::imageref::ImageRef;
use ocitag_core::labels::{parse_additional_tags, ADDITIONAL_TAGS_LABEL};
use ocitag_core::retry::run_with_retry;
use ocitag_core::tools::transient;

pub fn run_apply_tags(cfg: &OcitagConfig, tags: &[String], to_image: &ImageRef) -> Result<()> {
    let skopeo = super::skopeo(cfg)?;
    let policy = cfg.retry_policy();

    let format = format!("{{{{ index .Labels \"{ADDITIONAL_TAGS_LABEL}\" }}}}");
    let label = skopeo
        .inspect_format(to_image, &format)
        .with_context(|| format!("failed to inspect {to_image}"))?;
    let label_tags = label_tags(&label);
    tracing::debug!("tags from image label: {label_tags:?}");

    let all_tags = dedupe(tags.iter().cloned().chain(label_tags));
    tracing::info!("applying tags {all_tags:?} to {to_image}");

    for tag in &all_tags {
        let dest = to_image.with_tag(tag).without_digest();
        run_with_retry(&policy, transient, || skopeo.copy_all(to_image, &dest))
            .with_context(|| format!("failed to tag {to_image} as {dest}"))?;
        println!("tagged {dest}");
    }
    Ok(())
}

/// Tags listed in the image label. A missing label renders as Go's
/// `<no value>` under `{{ index }}`, which counts as empty.
fn label_tags(label: &str) -> Vec<String> {
    let label = label.trim();
    if label == "<no value>" {
        return Vec::new();
    }
    parse_additional_tags(label)
}

/// Order-preserving dedupe. Tag counts are tiny, a linear scan is fine.
fn dedupe(tags: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
