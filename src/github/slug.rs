//! Repository slug parsing.

use crate::error::{ConfigError, Result};
use std::fmt;

/// `owner/name` identifier of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoSlug {
    /// Split a slug on its single `/` separator.
    ///
    /// Both halves must be non-empty and there must be exactly one separator.
    pub fn parse(slug: &str) -> Result<Self> {
        let invalid = || ConfigError::InvalidSlug {
            slug: slug.to_string(),
        };

        let (owner, name) = slug.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid().into());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
