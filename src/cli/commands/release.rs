//! Release command: reconcile the release and upload every archive.

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;
use crate::github::{GitHubClient, ReleaseProvider};
use crate::publish::{Publisher, ReleaseAction};
use std::sync::Arc;

/// Execute release command
pub(super) async fn execute_release(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let project = super::load_project(args, true).await?;
    let slug = project.slug()?;

    config.section(&format!("Publishing {} to {}", project.git.current_tag, slug));
    config.indent(&format!(
        "{} os × {} arch from {}",
        project.build.oses.len(),
        project.build.arches.len(),
        project.dist.display()
    ));

    let client = GitHubClient::new(
        &project.token,
        &project.github.api_url,
        &project.github.upload_url,
    )?;
    let provider: Arc<dyn ReleaseProvider> = Arc::new(client);
    let probe = super::version_probe(&project);

    let publisher = Publisher::new(provider, Arc::new(project), probe);
    let summary = publisher.publish().await?;

    let verb = match summary.release.action {
        ReleaseAction::Created => "Created",
        ReleaseAction::Updated => "Updated",
    };
    config.success_println(&format!(
        "{} release {}",
        verb, summary.release.release.tag_name
    ));
    if !summary.release.release.html_url.is_empty() {
        config.indent(&summary.release.release.html_url);
    }

    config.section("Uploads");
    for outcome in &summary.uploads.outcomes {
        match &outcome.result {
            Ok(asset) => config.indent(&format!("✓ {:<16} {}", outcome.target.to_string(), asset)),
            Err(e) => config.error_println(&format!("{:<16} {}", outcome.target.to_string(), e)),
        }
    }

    let failures = summary.uploads.failures();
    if failures > 0 {
        config.warning_println(&format!(
            "{} of {} upload(s) failed, {} uploaded",
            failures,
            summary.uploads.outcomes.len(),
            summary.uploads.uploaded().len()
        ));
    } else {
        config.success_println(&format!(
            "Uploaded {} archive(s)",
            summary.uploads.outcomes.len()
        ));
    }

    summary.into_result()?;
    Ok(0)
}
