//! GitHub release API access.
//!
//! [`ReleaseProvider`] is the seam between the publishing pipeline and the
//! hosting provider. [`GitHubClient`] implements it over the GitHub REST API;
//! tests substitute in-memory providers.

mod client;
mod slug;
mod types;

pub use client::{DEFAULT_API_URL, DEFAULT_UPLOAD_URL, GitHubClient};
pub use slug::RepoSlug;
pub use types::{Release, ReleaseData};

use crate::error::Result;
use async_trait::async_trait;

/// Release operations consumed by the publishing pipeline
#[async_trait]
pub trait ReleaseProvider: Send + Sync {
    /// Look up the release attached to `tag`.
    ///
    /// # Returns
    /// - `Ok(Some(_))` - Release exists
    /// - `Ok(None)` - No release for this tag (HTTP 404)
    /// - `Err(_)` - Network, authentication or decoding error
    async fn get_release_by_tag(&self, owner: &str, repo: &str, tag: &str)
        -> Result<Option<Release>>;

    /// Create a new release
    async fn create_release(&self, owner: &str, repo: &str, data: &ReleaseData) -> Result<Release>;

    /// Overwrite name, tag and body of an existing release
    async fn edit_release(
        &self,
        owner: &str,
        repo: &str,
        release_id: u64,
        data: &ReleaseData,
    ) -> Result<Release>;

    /// Upload `file` as an asset named `name` on the release.
    ///
    /// Takes ownership of the handle; it is closed when the call returns.
    async fn upload_release_asset(
        &self,
        owner: &str,
        repo: &str,
        release_id: u64,
        name: &str,
        file: tokio::fs::File,
    ) -> Result<()>;
}
