//! Git context of a release: the tag being published and its changelog.
//!
//! Uses the system `git` binary. The changelog is the one-line log of commits
//! between the previous tag and the current one.

use crate::config::GitInfo;
use crate::error::{GitError, Result};
use std::path::Path;
use tokio::process::Command;

/// Run git in `repo` and return trimmed stdout
async fn git(repo: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .await
        .map_err(|e| GitError::CommandFailed {
            command: args.join(" "),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("not a git repository") {
            return Err(GitError::NotRepository.into());
        }
        return Err(GitError::CommandFailed {
            command: args.join(" "),
            reason: stderr.trim().to_string(),
        }
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Most recent tag reachable from HEAD
pub async fn current_tag(repo: &Path) -> Result<String> {
    git(repo, &["describe", "--tags", "--abbrev=0"]).await
}

/// Tag preceding `tag`, or `None` when `tag` is the first one
pub async fn previous_tag(repo: &Path, tag: &str) -> Result<Option<String>> {
    let parent = format!("{}^", tag);
    match git(repo, &["describe", "--tags", "--abbrev=0", &parent]).await {
        Ok(previous) => Ok(Some(previous)),
        Err(crate::error::ReleaseError::Git(GitError::CommandFailed { .. })) => Ok(None),
        Err(e) => Err(e),
    }
}

/// One-line log of the commits that make up `tag`
pub async fn changelog(repo: &Path, tag: &str) -> Result<String> {
    let range = match previous_tag(repo, tag).await? {
        Some(previous) => format!("{}..{}", previous, tag),
        None => tag.to_string(),
    };
    git(
        repo,
        &["log", "--pretty=oneline", "--abbrev-commit", &range],
    )
    .await
}

/// Tag and changelog of the release, with optional overrides
pub async fn resolve(repo: &Path, tag: Option<&str>, diff: Option<String>) -> Result<GitInfo> {
    let current_tag = match tag {
        Some(tag) => tag.to_string(),
        None => current_tag(repo).await?,
    };
    let diff = match diff {
        Some(diff) => diff,
        None => changelog(repo, &current_tag).await?,
    };
    log::debug!("Release tag {} ({} changelog line(s))", current_tag, diff.lines().count());
    Ok(GitInfo { current_tag, diff })
}
