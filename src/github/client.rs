//! GitHub REST implementation of [`ReleaseProvider`].

use super::ReleaseProvider;
use super::types::{ApiErrorBody, Release, ReleaseData};
use crate::error::{CliError, GitHubError, ReleaseError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::io::ReaderStream;
use url::Url;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Public GitHub asset upload endpoint
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com";

/// Authenticated GitHub API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client carrying auth headers
    http: reqwest::Client,
    /// Base URL for release endpoints
    api_url: Url,
    /// Base URL for asset uploads
    upload_url: Url,
}

impl GitHubClient {
    /// Create a client against the public GitHub endpoints
    pub fn with_token(token: &str) -> Result<Self> {
        Self::new(token, DEFAULT_API_URL, DEFAULT_UPLOAD_URL)
    }

    /// Create a client against explicit endpoints (GitHub Enterprise, test servers)
    pub fn new(token: &str, api_url: &str, upload_url: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            ReleaseError::Cli(CliError::InvalidArguments {
                reason: "GitHub token contains characters not allowed in an HTTP header"
                    .to_string(),
            })
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|source| GitHubError::Transport {
                operation: "github_client_init".to_string(),
                source,
            })?;

        Ok(Self {
            http,
            api_url: Url::parse(api_url).map_err(GitHubError::from)?,
            upload_url: Url::parse(upload_url).map_err(GitHubError::from)?,
        })
    }
}

/// Append path segments to a base URL, percent-encoding each one
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| GitHubError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn transport(operation: &str) -> impl FnOnce(reqwest::Error) -> ReleaseError + '_ {
    move |source| {
        GitHubError::Transport {
            operation: operation.to_string(),
            source,
        }
        .into()
    }
}

/// Turn a non-success response into an API error, preferring GitHub's `message` field
async fn api_error(operation: &str, response: Response) -> ReleaseError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);

    GitHubError::Api {
        operation: operation.to_string(),
        status,
        message,
    }
    .into()
}

async fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(api_error(operation, response).await);
    }
    response.json::<T>().await.map_err(|e| {
        GitHubError::Decode {
            operation: operation.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[async_trait]
impl ReleaseProvider for GitHubClient {
    async fn get_release_by_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> Result<Option<Release>> {
        let operation = "get_release_by_tag";
        let url = endpoint(
            &self.api_url,
            &["repos", owner, repo, "releases", "tags", tag],
        )?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport(operation))?;

        // Only a 404 means "no release"; every other failure is fatal
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(operation, response).await.map(Some)
    }

    async fn create_release(&self, owner: &str, repo: &str, data: &ReleaseData) -> Result<Release> {
        let operation = "create_release";
        let url = endpoint(&self.api_url, &["repos", owner, repo, "releases"])?;

        let response = self
            .http
            .post(url)
            .json(data)
            .send()
            .await
            .map_err(transport(operation))?;

        decode(operation, response).await
    }

    async fn edit_release(
        &self,
        owner: &str,
        repo: &str,
        release_id: u64,
        data: &ReleaseData,
    ) -> Result<Release> {
        let operation = "edit_release";
        let id = release_id.to_string();
        let url = endpoint(&self.api_url, &["repos", owner, repo, "releases", &id])?;

        let response = self
            .http
            .patch(url)
            .json(data)
            .send()
            .await
            .map_err(transport(operation))?;

        decode(operation, response).await
    }

    async fn upload_release_asset(
        &self,
        owner: &str,
        repo: &str,
        release_id: u64,
        name: &str,
        file: tokio::fs::File,
    ) -> Result<()> {
        let operation = "upload_release_asset";
        let id = release_id.to_string();
        let mut url = endpoint(
            &self.upload_url,
            &["repos", owner, repo, "releases", &id, "assets"],
        )?;
        url.query_pairs_mut().append_pair("name", name);

        // GitHub rejects chunked uploads, so the length must be known up front
        let length = file.metadata().await?.len();
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, length)
            .body(body)
            .send()
            .await
            .map_err(transport(operation))?;

        if !response.status().is_success() {
            return Err(api_error(operation, response).await);
        }
        Ok(())
    }
}
