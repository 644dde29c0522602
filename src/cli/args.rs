//! Command line argument parsing and validation.

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Publish pre-built archives to a GitHub release
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_release_publish",
    version,
    about = "Publish pre-built platform archives to a GitHub release",
    long_about = "Create or refresh the GitHub release for the current tag and upload
one archive per configured os/arch pair from the dist directory.

Usage:
  kodegen_release_publish release
  kodegen_release_publish release --tag v1.2.0 --config release.toml
  kodegen_release_publish changelog
  kodegen_release_publish check"
)]
pub struct Args {
    /// Command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Project configuration file
    #[arg(short, long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// GitHub token (defaults to GH_TOKEN, then GITHUB_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Release tag (defaults to the most recent git tag)
    #[arg(long, global = true, value_name = "TAG")]
    pub tag: Option<String>,

    /// Read the changelog text from a file instead of git
    #[arg(long, global = true, value_name = "FILE")]
    pub diff_file: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create or update the release and upload every archive
    Release,
    /// Print the release body that would be published
    Changelog,
    /// Validate configuration and list the expected archives
    Check,
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Release => "release",
            Command::Changelog => "changelog",
            Command::Check => "check",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(tag) = &self.tag
            && tag.trim().is_empty()
        {
            return Err("--tag must not be empty".to_string());
        }
        if let Some(token) = &self.token
            && token.trim().is_empty()
        {
            return Err("--token must not be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(quiet),
        }
    }

    /// Print message
    pub fn println(&self, message: &str) {
        self.output.println(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        self.output.success(message);
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        self.output.section(title);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message);
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.quiet)
    }
}
