//! Changelog command: print the release body without publishing.

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;

/// Execute changelog command
pub(super) async fn execute_changelog(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let project = super::load_project(args, false).await?;
    let probe = super::version_probe(&project);
    let body = crate::changelog::compose(&project.git.diff, probe.as_ref()).await;

    config.section(&format!("Release notes for {}", project.git.current_tag));
    config.println(&body);
    Ok(0)
}
