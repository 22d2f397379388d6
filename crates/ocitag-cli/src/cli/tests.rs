//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_apply_tags() {
    let cli = parse(&[
        "ocitag",
        "apply-tags",
        "--tags",
        "v1",
        "v1.0",
        "--to-image",
        "quay.io/ns/img:latest@sha256:abc",
    ]);
    match cli.command {
        CliCommand::ApplyTags { tags, to_image } => {
            assert_eq!(tags, vec!["v1", "v1.0"]);
            assert_eq!(to_image.repo, "quay.io/ns/img");
            assert_eq!(to_image.tag.as_deref(), Some("latest"));
            assert_eq!(to_image.digest.as_deref(), Some("sha256:abc"));
        }
        _ => panic!("expected ApplyTags"),
    }
}

#[test]
fn cli_apply_tags_requires_tags() {
    assert!(Cli::try_parse_from(["ocitag", "apply-tags", "--to-image", "quay.io/ns/img"]).is_err());
}

#[test]
fn cli_apply_tags_requires_image() {
    assert!(Cli::try_parse_from(["ocitag", "apply-tags", "--tags", "v1"]).is_err());
}

#[test]
fn cli_parse_push_containerfile_defaults() {
    let cli = parse(&[
        "ocitag",
        "push-containerfile",
        "--for-image",
        "quay.io/ns/img@sha256:abc",
    ]);
    match cli.command {
        CliCommand::PushContainerfile {
            source,
            context,
            file,
            for_image,
            artifact_type,
            tag_suffix,
        } => {
            assert_eq!(source, std::path::PathBuf::from("."));
            assert_eq!(context, std::path::PathBuf::from("."));
            assert!(file.is_none());
            assert_eq!(for_image.digest.as_deref(), Some("sha256:abc"));
            assert_eq!(artifact_type, "application/vnd.ocitag.containerfile");
            assert_eq!(tag_suffix, ".containerfile");
        }
        _ => panic!("expected PushContainerfile"),
    }
}

#[test]
fn cli_parse_push_containerfile_explicit() {
    let cli = parse(&[
        "ocitag",
        "push-containerfile",
        "--source",
        "/src",
        "--context",
        "app",
        "-f",
        "app/Containerfile.prod",
        "--for-image",
        "quay.io/ns/img@sha256:abc",
        "--artifact-type",
        "application/x-custom",
        "--tag-suffix",
        ".buildfile",
    ]);
    match cli.command {
        CliCommand::PushContainerfile {
            source,
            context,
            file,
            artifact_type,
            tag_suffix,
            ..
        } => {
            assert_eq!(source, std::path::PathBuf::from("/src"));
            assert_eq!(context, std::path::PathBuf::from("app"));
            assert_eq!(file, Some(std::path::PathBuf::from("app/Containerfile.prod")));
            assert_eq!(artifact_type, "application/x-custom");
            assert_eq!(tag_suffix, ".buildfile");
        }
        _ => panic!("expected PushContainerfile"),
    }
}

#[test]
fn cli_log_level_default_and_override() {
    let cli = parse(&["ocitag", "apply-tags", "--tags", "v1", "--to-image", "q/i"]);
    assert_eq!(cli.log_level, "info");

    let cli = parse(&[
        "ocitag",
        "apply-tags",
        "--tags",
        "v1",
        "--to-image",
        "q/i",
        "--log-level",
        "debug",
    ]);
    assert_eq!(cli.log_level, "debug");
}

#[test]
fn cli_rejects_unparseable_image_ref() {
    assert!(Cli::try_parse_from(["ocitag", "apply-tags", "--tags", "v1", "--to-image", ""]).is_err());
}
