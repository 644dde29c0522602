//! # Kodegen Release Publish
//!
//! Publishes pre-built platform archives to a GitHub release.
//!
//! A run has two phases:
//!
//! - **Reconcile**: find the release for the tag and overwrite its name and
//!   body, or create it when the tag has no release yet. Reruns never create
//!   duplicates.
//! - **Upload**: one concurrent task per os × arch pair streams
//!   `dist/<archive>.<format>` to the release. Every task runs to completion
//!   and the first failure is reported.
//!
//! ## Usage
//!
//! ```bash
//! kodegen_release_publish check       # list the archives the release needs
//! kodegen_release_publish changelog   # preview the release body
//! kodegen_release_publish release     # publish
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod changelog;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod publish;

pub use changelog::{CommandProbe, NoProbe, VersionProbe, compose};
pub use cli::Args;
pub use config::{GitInfo, ProjectConfig};
pub use error::{ReleaseError, Result};
pub use github::{GitHubClient, Release, ReleaseData, ReleaseProvider, RepoSlug};
pub use publish::{Publisher, ReleaseAction, ReleaseTarget};
