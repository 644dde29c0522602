//! In-memory release provider shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use kodegen_release_publish::error::{GitHubError, Result};
use kodegen_release_publish::{Release, ReleaseData, ReleaseProvider};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// Provider call, recorded in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get(String),
    Create(String),
    Edit(u64),
}

/// Asset received by the fake provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uploaded {
    pub release_id: u64,
    pub name: String,
    pub content: Vec<u8>,
}

/// Scripted behavior for the upload of one asset
#[derive(Debug, Clone)]
pub enum Script {
    /// Reject with `status` after sleeping
    Fail { status: u16, after: Duration },
    /// Panic after sleeping
    Panic { after: Duration },
}

#[derive(Default)]
pub struct FakeProvider {
    pub releases: Mutex<Vec<Release>>,
    pub calls: Mutex<Vec<Call>>,
    pub uploads: Mutex<Vec<Uploaded>>,
    pub upload_attempts: AtomicUsize,
    pub next_id: AtomicU64,
    /// Lookup fails with this HTTP status instead of answering
    pub lookup_status: Option<u16>,
    /// Uploads of this asset name are rejected
    pub reject_asset: Option<String>,
    /// Per-asset upload behavior, keyed by asset name
    pub scripts: HashMap<String, Script>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn releases(&self) -> Vec<Release> {
        self.releases.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<Uploaded> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .uploads()
            .into_iter()
            .map(|upload| upload.name)
            .collect();
        names.sort();
        names
    }

    pub fn attempts(&self) -> usize {
        self.upload_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseProvider for FakeProvider {
    async fn get_release_by_tag(
        &self,
        _owner: &str,
        _repo: &str,
        tag: &str,
    ) -> Result<Option<Release>> {
        self.calls.lock().unwrap().push(Call::Get(tag.to_string()));
        if let Some(status) = self.lookup_status {
            return Err(GitHubError::Api {
                operation: "get_release_by_tag".to_string(),
                status,
                message: "Bad credentials".to_string(),
            }
            .into());
        }
        let found = self
            .releases
            .lock()
            .unwrap()
            .iter()
            .find(|release| release.tag_name == tag)
            .cloned();
        Ok(found)
    }

    async fn create_release(&self, _owner: &str, _repo: &str, data: &ReleaseData) -> Result<Release> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(data.tag_name.clone()));
        let release = Release {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: Some(data.name.clone()),
            tag_name: data.tag_name.clone(),
            body: Some(data.body.clone()),
            html_url: format!("https://example.test/releases/{}", data.tag_name),
        };
        self.releases.lock().unwrap().push(release.clone());
        Ok(release)
    }

    async fn edit_release(
        &self,
        _owner: &str,
        _repo: &str,
        release_id: u64,
        data: &ReleaseData,
    ) -> Result<Release> {
        self.calls.lock().unwrap().push(Call::Edit(release_id));
        let mut releases = self.releases.lock().unwrap();
        let release = releases
            .iter_mut()
            .find(|release| release.id == release_id)
            .ok_or_else(|| GitHubError::Api {
                operation: "edit_release".to_string(),
                status: 404,
                message: "Not Found".to_string(),
            })?;
        release.name = Some(data.name.clone());
        release.tag_name = data.tag_name.clone();
        release.body = Some(data.body.clone());
        Ok(release.clone())
    }

    async fn upload_release_asset(
        &self,
        _owner: &str,
        _repo: &str,
        release_id: u64,
        name: &str,
        mut file: tokio::fs::File,
    ) -> Result<()> {
        self.upload_attempts.fetch_add(1, Ordering::SeqCst);
        let mut content = Vec::new();
        file.read_to_end(&mut content).await?;

        // Let sibling tasks interleave
        tokio::task::yield_now().await;

        match self.scripts.get(name) {
            Some(Script::Fail { status, after }) => {
                tokio::time::sleep(*after).await;
                return Err(GitHubError::Api {
                    operation: "upload_release_asset".to_string(),
                    status: *status,
                    message: format!("scripted failure for {}", name),
                }
                .into());
            }
            Some(Script::Panic { after }) => {
                tokio::time::sleep(*after).await;
                panic!("scripted panic for {}", name);
            }
            None => {}
        }

        if self.reject_asset.as_deref() == Some(name) {
            return Err(GitHubError::Api {
                operation: "upload_release_asset".to_string(),
                status: 422,
                message: "already_exists".to_string(),
            }
            .into());
        }

        self.uploads.lock().unwrap().push(Uploaded {
            release_id,
            name: name.to_string(),
            content,
        });
        Ok(())
    }
}

/// Write a dummy archive into `dist`
pub fn write_archive(dist: &Path, name: &str) {
    std::fs::write(dist.join(name), format!("archive:{}", name)).unwrap();
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
