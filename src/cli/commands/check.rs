//! Check command: validate configuration and list the archives a release needs.

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;
use crate::publish::matrix;

/// Execute check command
///
/// Exits with 1 when any archive name cannot be resolved or any archive is
/// missing from the dist directory.
pub(super) async fn execute_check(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let project = super::load_project(args, false).await?;
    let slug = project.slug()?;

    config.section(&format!("{} {}", slug, project.git.current_tag));

    let targets = matrix(&project.build.oses, &project.build.arches);
    let mut problems = 0usize;

    for target in &targets {
        match project.archive_file_name(&target.os, &target.arch) {
            Ok(name) => {
                let path = project.dist.join(&name);
                if path.is_file() {
                    config.indent(&format!("✓ {:<16} {}", target.to_string(), path.display()));
                } else {
                    problems += 1;
                    config.warning_println(&format!(
                        "{:<16} {} (missing)",
                        target.to_string(),
                        path.display()
                    ));
                }
            }
            Err(e) => {
                problems += 1;
                config.error_println(&format!("{}: {}", target, e));
            }
        }
    }

    if problems > 0 {
        config.error_println(&format!(
            "{} of {} archive(s) not ready",
            problems,
            targets.len()
        ));
        return Ok(1);
    }

    config.success_println(&format!("All {} archive(s) ready", targets.len()));
    Ok(0)
}
