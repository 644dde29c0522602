//! Command execution.
//!
//! Each command loads the project configuration, resolves the git context and
//! then hands off to the library. Errors are reported here with recovery
//! suggestions and turned into a non-zero exit code.

mod changelog;
mod check;
mod release;

use crate::changelog::{CommandProbe, NoProbe, VersionProbe};
use crate::cli::{Args, Command, RuntimeConfig};
use crate::config::{ProjectConfig, resolve_token};
use crate::error::{ConfigError, Result};

use changelog::execute_changelog;
use check::execute_check;
use release::execute_release;

/// Execute the command selected by `args`, returning the process exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Release => execute_release(&args, &config).await,
        Command::Changelog => execute_changelog(&args, &config).await,
        Command::Check => execute_check(&args, &config).await,
    };

    match result {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            config.error_println(&format!(
                "Command '{}' failed: {}",
                args.command.name(),
                e
            ));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  • {}", suggestion));
                }
            }

            Ok(1)
        }
    }
}

/// Load the project file and fill in tag, changelog and (optionally) token
async fn load_project(args: &Args, with_token: bool) -> Result<ProjectConfig> {
    let mut project = ProjectConfig::load(&args.config)?;
    project.validate()?;

    let diff = match &args.diff_file {
        Some(path) => Some(tokio::fs::read_to_string(path).await.map_err(|source| {
            ConfigError::DiffFile {
                path: path.clone(),
                source,
            }
        })?),
        None => None,
    };
    let repo_dir = std::env::current_dir()?;
    project.git = crate::git::resolve(&repo_dir, args.tag.as_deref(), diff).await?;
    if project.git.current_tag.is_empty() {
        return Err(ConfigError::MissingTag.into());
    }

    if with_token {
        project.token = resolve_token(args.token.as_deref(), |key| std::env::var(key).ok())?;
    }

    Ok(project)
}

/// Version probe configured for the project
fn version_probe(project: &ProjectConfig) -> Box<dyn VersionProbe> {
    match CommandProbe::from_argv(&project.changelog.version_command) {
        Some(probe) => Box::new(probe),
        None => Box::new(NoProbe),
    }
}
