//! Upload of a single platform archive.

use super::dispatcher::ReleaseTarget;
use crate::config::ProjectConfig;
use crate::error::{ReleaseError, Result};
use crate::github::{ReleaseProvider, RepoSlug};

/// Upload the archive for `target` to the release, returning the asset name.
///
/// The archive is expected at `<dist>/<archive name>.<format>`. A missing or
/// unreadable file fails before the provider is contacted. The file handle is
/// owned by this call and closed on every path.
pub async fn upload(
    provider: &dyn ReleaseProvider,
    release_id: u64,
    target: &ReleaseTarget,
    config: &ProjectConfig,
) -> Result<String> {
    let slug = RepoSlug::parse(&config.repo)?;
    let name = config.archive_file_name(&target.os, &target.arch)?;
    let path = config.dist.join(&name);

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|source| ReleaseError::FileAccess {
            path: path.clone(),
            source,
        })?;

    log::info!("Uploading {} ...", path.display());
    provider
        .upload_release_asset(&slug.owner, &slug.name, release_id, &name, file)
        .await?;

    Ok(name)
}
