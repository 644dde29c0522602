//! Release payloads exchanged with the hosting provider.

use serde::{Deserialize, Serialize};

/// Release record as returned by the provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Provider-assigned identifier
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Tag the release is attached to
    pub tag_name: String,
    /// Release notes
    #[serde(default)]
    pub body: Option<String>,
    /// Web URL of the release page
    #[serde(default)]
    pub html_url: String,
}

/// Fields written when creating or editing a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseData {
    /// Display name
    pub name: String,
    /// Tag the release is attached to
    pub tag_name: String,
    /// Release notes
    pub body: String,
}

impl ReleaseData {
    /// Release data named after its tag
    pub fn for_tag(tag: &str, body: &str) -> Self {
        Self {
            name: tag.to_string(),
            tag_name: tag.to_string(),
            body: body.to_string(),
        }
    }
}

/// Error payload returned by the GitHub API
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
