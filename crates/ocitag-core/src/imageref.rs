//! Container image reference model.
//!
//! ```text
//! registry.example.org:5000/foo/bar:v0.1.2@sha256:deadbeef
//! |-------------------------------| |----| |-------------|
//!               repo                 tag        digest
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A container image reference: repository plus optional tag and digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub repo: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageRefError {
    #[error("image ref {0:?} has an empty repository")]
    EmptyRepo(String),
}

impl ImageRef {
    /// Parse a string as an ImageRef.
    ///
    /// The tag separator is the last `:` in the final path component, so a
    /// registry port (`registry:5000/foo`) is not mistaken for a tag. An
    /// empty tag or digest is treated as absent.
    pub fn parse(s: &str) -> Result<Self, ImageRefError> {
        let (repo_and_tag, digest) = match s.split_once('@') {
            Some((head, digest)) => (head, (!digest.is_empty()).then(|| digest.to_string())),
            None => (s, None),
        };

        let (repo, tag) = match repo_and_tag.rsplit_once(':') {
            Some((repo, tag)) if !tag.contains('/') => {
                (repo.to_string(), (!tag.is_empty()).then(|| tag.to_string()))
            }
            _ => (repo_and_tag.to_string(), None),
        };

        if repo.is_empty() {
            return Err(ImageRefError::EmptyRepo(s.to_string()));
        }
        Ok(Self { repo, tag, digest })
    }

    /// Same reference with the tag replaced.
    pub fn with_tag(&self, tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            ..self.clone()
        }
    }

    /// Same reference with the tag removed.
    pub fn without_tag(&self) -> Self {
        Self {
            tag: None,
            ..self.clone()
        }
    }

    /// Same reference with the digest removed.
    pub fn without_digest(&self) -> Self {
        Self {
            digest: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repo)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}

impl FromStr for ImageRef {
    type Err = ImageRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
