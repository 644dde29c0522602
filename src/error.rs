//! Error types for release publishing.
//!
//! Every failure a run can hit is modeled here with an actionable message.
//! Release lookups that find nothing are not errors; they surface as `Ok(None)`
//! from the provider and drive the create path instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publishing operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all publishing operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Project configuration errors (including malformed repository slugs)
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Hosting provider API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// Archive name could not be resolved for a target
    #[error("Naming error: {0}")]
    Naming(#[from] NamingError),

    /// Artifact file missing or unreadable
    #[error("Cannot open artifact {}: {source}", .path.display())]
    FileAccess {
        /// Path that was opened
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Git context errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Upload task aborted before producing a result
    #[error("Upload task for {target} did not complete: {reason}")]
    Task {
        /// Target the task was uploading
        target: String,
        /// Why the task ended
        reason: String,
    },

    /// CLI errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Repository slug is not of the form owner/name
    #[error("Invalid repository slug '{slug}'. Expected: owner/name")]
    InvalidSlug {
        /// Slug as configured
        slug: String,
    },

    /// Config file could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected schema
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Parse error
        #[source]
        source: toml::de::Error,
    },

    /// Changelog override file could not be read
    #[error("Failed to read changelog file {}: {source}", .path.display())]
    DiffFile {
        /// Path given with --diff-file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// No authentication token available
    #[error("GitHub token not provided. Set GITHUB_TOKEN or GH_TOKEN or use --token")]
    MissingToken,

    /// No release tag available
    #[error("No release tag: the current commit has no tag and --tag was not given")]
    MissingTag,

    /// Build matrix has no entries
    #[error("Build matrix is empty: configure at least one os and one arch")]
    EmptyMatrix,

    /// Archive name template failed to compile
    #[error("Invalid archive name template '{template}': {reason}")]
    InvalidTemplate {
        /// Template source
        template: String,
        /// Compile error
        reason: String,
    },
}

/// Hosting provider errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// API answered with a non-success status
    #[error("{operation} failed with HTTP {status}: {message}")]
    Api {
        /// Operation that was attempted
        operation: String,
        /// HTTP status code
        status: u16,
        /// Message returned by the API
        message: String,
    },

    /// Request never produced a response
    #[error("{operation} request failed: {source}")]
    Transport {
        /// Operation that was attempted
        operation: String,
        /// Transport error
        #[source]
        source: reqwest::Error,
    },

    /// Response body did not match the expected shape
    #[error("{operation} returned an unreadable response: {reason}")]
    Decode {
        /// Operation that was attempted
        operation: String,
        /// Decode failure
        reason: String,
    },

    /// Endpoint URL could not be built
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Archive naming errors
#[derive(Error, Debug)]
pub enum NamingError {
    /// Operating system not known to the archive namer
    #[error("Unsupported operating system '{os}' (arch '{arch}')")]
    UnsupportedOs {
        /// Requested OS
        os: String,
        /// Requested architecture
        arch: String,
    },

    /// Architecture not known to the archive namer
    #[error("Unsupported architecture '{arch}' (os '{os}')")]
    UnsupportedArch {
        /// Requested OS
        os: String,
        /// Requested architecture
        arch: String,
    },

    /// Template rendering failed
    #[error("Failed to render archive name for {os}/{arch}: {reason}")]
    Render {
        /// Requested OS
        os: String,
        /// Requested architecture
        arch: String,
        /// Render failure
        reason: String,
    },
}

/// Git context errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Not a git repository
    #[error("Not a git repository. Please run from within a git checkout.")]
    NotRepository,

    /// Git command failed
    #[error("git {command} failed: {reason}")]
    CommandFailed {
        /// Arguments passed to git
        command: String,
        /// stderr or spawn error
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Config(ConfigError::MissingToken) => vec![
                "Export a token: export GITHUB_TOKEN=<token>".to_string(),
                "Or pass it explicitly with --token".to_string(),
            ],
            ReleaseError::Config(ConfigError::InvalidSlug { .. }) => vec![
                "Set repo = \"owner/name\" in the config file".to_string(),
            ],
            ReleaseError::Config(ConfigError::MissingTag) => vec![
                "Tag the release commit: git tag v1.2.3".to_string(),
                "Or pass the tag explicitly with --tag".to_string(),
            ],
            ReleaseError::Config(ConfigError::DiffFile { .. }) => vec![
                "Check the path passed to --diff-file".to_string(),
                "Or omit it to use the git log since the previous tag".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::Api { status: 401 | 403, .. }) => vec![
                "Verify the token is valid and has the repo scope".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::Api { status: 422, .. }) => vec![
                "An asset with the same name may already exist on the release".to_string(),
                "Delete the stale asset and rerun".to_string(),
            ],
            ReleaseError::FileAccess { .. } => vec![
                "Run the build step first so every archive exists under dist/".to_string(),
                "Use the check command to list the expected artifact paths".to_string(),
            ],
            ReleaseError::Naming(_) => vec![
                "Remove the unsupported entry from [build] oses/arches".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
