//! Release reconciliation: exactly one release per tag, carrying the latest body.

use crate::error::Result;
use crate::github::{Release, ReleaseData, ReleaseProvider, RepoSlug};

/// Which path reconciliation took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    /// No release existed for the tag; one was created
    Created,
    /// A release existed; its name and body were overwritten
    Updated,
}

/// Release after reconciliation
#[derive(Debug, Clone)]
pub struct ReconciledRelease {
    /// Release as returned by the provider
    pub release: Release,
    /// Path taken
    pub action: ReleaseAction,
}

/// Ensure a release exists for `tag` with `body`, creating or editing it.
///
/// An existing release is always edited, even when nothing changed, so reruns
/// converge on the latest body. Only a not-found lookup leads to creation; any
/// other lookup failure is returned before anything is written.
pub async fn get_or_create(
    provider: &dyn ReleaseProvider,
    repo: &str,
    tag: &str,
    body: &str,
) -> Result<ReconciledRelease> {
    let slug = RepoSlug::parse(repo)?;
    let data = ReleaseData::for_tag(tag, body);

    match provider
        .get_release_by_tag(&slug.owner, &slug.name, tag)
        .await?
    {
        None => {
            log::info!("Creating release {} on {} ...", tag, slug);
            let release = provider
                .create_release(&slug.owner, &slug.name, &data)
                .await?;
            Ok(ReconciledRelease {
                release,
                action: ReleaseAction::Created,
            })
        }
        Some(existing) => {
            log::info!("Updating existing release {} on {} ...", tag, slug);
            let release = provider
                .edit_release(&slug.owner, &slug.name, existing.id, &data)
                .await?;
            Ok(ReconciledRelease {
                release,
                action: ReleaseAction::Updated,
            })
        }
    }
}
