//! Release publishing pipeline.
//!
//! Publishing runs in two phases separated by a barrier:
//!
//! 1. [`release::get_or_create`] reconciles the remote release for the tag.
//! 2. [`dispatcher::dispatch`] uploads every matrix archive to that release
//!    concurrently.
//!
//! No upload starts before the release id exists, and a reconciliation
//! failure aborts the run before any upload.

pub mod dispatcher;
pub mod release;
pub mod uploader;

pub use dispatcher::{ReleaseTarget, UploadOutcome, UploadReport, matrix};
pub use release::{ReconciledRelease, ReleaseAction, get_or_create};

use crate::changelog::{self, VersionProbe};
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::github::ReleaseProvider;
use std::sync::Arc;

/// Outcome of a publish whose release was reconciled.
///
/// Upload failures do not discard the report; [`PublishSummary::into_result`]
/// turns it into the first error by completion order.
#[derive(Debug)]
pub struct PublishSummary {
    /// Reconciled release
    pub release: ReconciledRelease,
    /// Outcome of every upload task, in completion order
    pub uploads: UploadReport,
}

impl PublishSummary {
    /// Uploaded asset names, or the first upload error
    pub fn into_result(self) -> Result<Vec<String>> {
        self.uploads.into_result()
    }
}

/// Publishes one tag's archives to its release
pub struct Publisher {
    provider: Arc<dyn ReleaseProvider>,
    config: Arc<ProjectConfig>,
    probe: Box<dyn VersionProbe>,
}

impl Publisher {
    /// Create a publisher for `config`
    pub fn new(
        provider: Arc<dyn ReleaseProvider>,
        config: Arc<ProjectConfig>,
        probe: Box<dyn VersionProbe>,
    ) -> Self {
        Self {
            provider,
            config,
            probe,
        }
    }

    /// Release body for the configured diff
    pub async fn body(&self) -> String {
        changelog::compose(&self.config.git.diff, self.probe.as_ref()).await
    }

    /// Reconcile the release, then upload every archive.
    ///
    /// Fails only when reconciliation fails, in which case nothing is uploaded.
    /// Upload failures are carried in the returned report; every upload runs
    /// to completion.
    pub async fn publish(&self) -> Result<PublishSummary> {
        let tag = &self.config.git.current_tag;
        let body = self.body().await;

        let release =
            get_or_create(self.provider.as_ref(), &self.config.repo, tag, &body).await?;

        let uploads = dispatcher::dispatch(
            Arc::clone(&self.provider),
            release.release.id,
            &self.config.build.oses,
            &self.config.build.arches,
            Arc::clone(&self.config),
        )
        .await;

        Ok(PublishSummary { release, uploads })
    }
}
