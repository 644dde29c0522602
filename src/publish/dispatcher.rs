//! Concurrent upload of the whole os × arch matrix.
//!
//! Every target gets its own task. All tasks are joined before any result is
//! inspected: a failing upload never cancels its siblings, and the caller sees
//! the first error in completion order.

use super::uploader;
use crate::config::ProjectConfig;
use crate::error::{ReleaseError, Result};
use crate::github::ReleaseProvider;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinSet;

/// One (os, arch) entry of the build matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseTarget {
    /// Operating system
    pub os: String,
    /// Architecture
    pub arch: String,
}

impl ReleaseTarget {
    /// Target for `os`/`arch`
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }
}

impl fmt::Display for ReleaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Cross product of `oses` and `arches`, OS-major. Duplicates are kept.
pub fn matrix(oses: &[String], arches: &[String]) -> Vec<ReleaseTarget> {
    oses.iter()
        .flat_map(|os| arches.iter().map(move |arch| ReleaseTarget::new(os, arch)))
        .collect()
}

/// Result of one upload task
#[derive(Debug)]
pub struct UploadOutcome {
    /// Target the task uploaded
    pub target: ReleaseTarget,
    /// Asset name on success
    pub result: Result<String>,
}

/// Outcomes of every upload task, in completion order
#[derive(Debug, Default)]
pub struct UploadReport {
    /// One entry per launched task
    pub outcomes: Vec<UploadOutcome>,
}

impl UploadReport {
    /// Names of the assets uploaded successfully
    pub fn uploaded(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok().map(String::as_str))
            .collect()
    }

    /// Number of failed tasks
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_err())
            .count()
    }

    /// First error by completion order, or the uploaded asset names
    pub fn into_result(self) -> Result<Vec<String>> {
        let mut uploaded = Vec::with_capacity(self.outcomes.len());
        for outcome in self.outcomes {
            uploaded.push(outcome.result?);
        }
        Ok(uploaded)
    }
}

/// Upload every matrix target concurrently and wait for all of them.
pub async fn dispatch(
    provider: Arc<dyn ReleaseProvider>,
    release_id: u64,
    oses: &[String],
    arches: &[String],
    config: Arc<ProjectConfig>,
) -> UploadReport {
    let mut joins = JoinSet::new();
    let mut targets = HashMap::new();

    for target in matrix(oses, arches) {
        let provider = Arc::clone(&provider);
        let config = Arc::clone(&config);
        let task_target = target.clone();
        let handle = joins.spawn(async move {
            uploader::upload(provider.as_ref(), release_id, &task_target, &config).await
        });
        targets.insert(handle.id(), target);
    }

    log::debug!("Launched {} upload task(s)", targets.len());

    let mut report = UploadReport::default();
    while let Some(joined) = joins.join_next_with_id().await {
        let (id, result) = match joined {
            Ok((id, result)) => (id, result),
            Err(e) => {
                let id = e.id();
                let target = targets
                    .get(&id)
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown target".to_string());
                let reason = if e.is_panic() {
                    "task panicked".to_string()
                } else {
                    e.to_string()
                };
                (id, Err(ReleaseError::Task { target, reason }))
            }
        };

        let Some(target) = targets.remove(&id) else {
            continue;
        };
        match &result {
            Ok(name) => log::info!("Uploaded {} ({})", name, target),
            Err(e) => log::error!("Upload for {} failed: {}", target, e),
        }
        report.outcomes.push(UploadOutcome { target, result });
    }

    report
}

/// Upload the matrix and return the first error by completion order.
///
/// Every task runs to completion regardless of sibling failures.
pub async fn run(
    provider: Arc<dyn ReleaseProvider>,
    release_id: u64,
    oses: &[String],
    arches: &[String],
    config: Arc<ProjectConfig>,
) -> Result<()> {
    dispatch(provider, release_id, oses, arches, config)
        .await
        .into_result()
        .map(|_| ())
}
