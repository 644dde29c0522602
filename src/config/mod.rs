//! Project configuration.
//!
//! The project file (TOML, `.release.toml` by default) describes the repository,
//! the build matrix and how archives are named. Runtime values that do not
//! belong in the file (token, tag, diff) are filled in by the CLI before the
//! pipeline starts.

mod archive;

pub use archive::{ArchiveNamer, SUPPORTED_ARCHES, SUPPORTED_OSES};

use crate::error::{ConfigError, Result};
use crate::github::{DEFAULT_API_URL, DEFAULT_UPLOAD_URL, RepoSlug};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default project file name, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".release.toml";

/// Complete configuration for one publishing run
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Repository slug (owner/name)
    pub repo: String,
    /// Binary name used in archive names (defaults to the repository name)
    #[serde(default)]
    pub binary_name: Option<String>,
    /// Directory holding the built archives
    #[serde(default = "default_dist")]
    pub dist: PathBuf,
    /// Target matrix
    #[serde(default)]
    pub build: BuildConfig,
    /// Archive naming
    #[serde(default)]
    pub archive: ArchiveConfig,
    /// Release notes options
    #[serde(default)]
    pub changelog: ChangelogConfig,
    /// API endpoints
    #[serde(default)]
    pub github: GitHubConfig,
    /// Authentication token (never read from the file)
    #[serde(skip)]
    pub token: String,
    /// Tag and diff of the release being published
    #[serde(skip)]
    pub git: GitInfo,
}

/// Operating systems and architectures to publish
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Target operating systems, in publishing order
    #[serde(default = "default_oses")]
    pub oses: Vec<String>,
    /// Target architectures, in publishing order
    #[serde(default = "default_arches")]
    pub arches: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            oses: default_oses(),
            arches: default_arches(),
        }
    }
}

/// Archive naming
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// File extension appended to every archive name
    #[serde(default = "default_format")]
    pub format: String,
    /// Handlebars template; variables: binary, os, arch, version
    #[serde(default = "default_name_template")]
    pub name_template: String,
    /// Display names substituted for raw os/arch values
    #[serde(default)]
    pub replacements: BTreeMap<String, String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            name_template: default_name_template(),
            replacements: BTreeMap::new(),
        }
    }
}

/// Release notes options
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangelogConfig {
    /// Command whose output becomes the "Built with" line; empty disables it
    #[serde(default = "default_version_command")]
    pub version_command: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            version_command: default_version_command(),
        }
    }
}

/// API endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Asset upload base URL
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            upload_url: default_upload_url(),
        }
    }
}

/// Git state of the release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
    /// Tag being released
    pub current_tag: String,
    /// Changelog text (commits since the previous tag)
    pub diff: String,
}

fn default_dist() -> PathBuf {
    PathBuf::from("dist")
}

fn default_oses() -> Vec<String> {
    vec!["linux".to_string(), "darwin".to_string()]
}

fn default_arches() -> Vec<String> {
    vec!["amd64".to_string(), "386".to_string()]
}

fn default_format() -> String {
    "tar.gz".to_string()
}

fn default_name_template() -> String {
    "{{binary}}_{{os}}_{{arch}}".to_string()
}

fn default_version_command() -> Vec<String> {
    vec!["go".to_string(), "version".to_string()]
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_upload_url() -> String {
    DEFAULT_UPLOAD_URL.to_string()
}

impl ProjectConfig {
    /// Minimal configuration for `repo` with every other field defaulted
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            binary_name: None,
            dist: default_dist(),
            build: BuildConfig::default(),
            archive: ArchiveConfig::default(),
            changelog: ChangelogConfig::default(),
            github: GitHubConfig::default(),
            token: String::new(),
            git: GitInfo::default(),
        }
    }

    /// Load and parse a project file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Parse project file contents; `origin` is only used in error messages
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config for {} from {}", config.repo, origin.display());
        Ok(config)
    }

    /// Repository slug split into owner and name
    pub fn slug(&self) -> Result<RepoSlug> {
        RepoSlug::parse(&self.repo)
    }

    /// Binary name used in archive names
    pub fn binary_name(&self) -> Result<String> {
        match &self.binary_name {
            Some(name) => Ok(name.clone()),
            None => Ok(self.slug()?.name),
        }
    }

    /// Archive base name (without extension) for one target
    pub fn archive_name(&self, os: &str, arch: &str) -> Result<String> {
        ArchiveNamer::from_config(self)?.name(os, arch)
    }

    /// Archive file name including the configured format extension
    pub fn archive_file_name(&self, os: &str, arch: &str) -> Result<String> {
        Ok(format!("{}.{}", self.archive_name(os, arch)?, self.archive.format))
    }

    /// Check everything that can be checked before touching the network
    pub fn validate(&self) -> Result<()> {
        self.slug()?;
        if self.build.oses.is_empty() || self.build.arches.is_empty() {
            return Err(ConfigError::EmptyMatrix.into());
        }
        ArchiveNamer::from_config(self)?;
        Ok(())
    }
}

/// Resolve the API token: explicit value first, then `GH_TOKEN`, then `GITHUB_TOKEN`
pub fn resolve_token(
    explicit: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    explicit
        .map(str::to_string)
        .or_else(|| env("GH_TOKEN"))
        .or_else(|| env("GITHUB_TOKEN"))
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingToken.into())
}
