//! HTTP client for a Yarn pod's `/api/v1` endpoints.
//!
//! The client owns the transport concerns the pipeline stays out of:
//! authentication, timeline payload fetching, status posting, executing
//! asset fetch plans, and media uploads with their server-side task poll.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AssetUnavailable;
use crate::models::TimelineName;
use crate::pipeline::{AssetFetch, FetchDecision, FileStore};
use crate::session::Session;

/// How long to wait between media-task polls.
const TASK_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Give up on a media task after this many polls.
const TASK_POLL_LIMIT: u32 = 60;

/// Yarn pod API client
pub struct YarnClient {
    client: Client,
    session: Session,
}

impl YarnClient {
    /// Create a client for `session`. When the session has SSL verify
    /// off, certificate errors are ignored (the pod URL is already forced
    /// to plain `http` in that case).
    pub fn new(session: Session) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!session.verify_ssl)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, session })
    }

    /// The session this client talks for.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/v1{}", self.session.server_url, endpoint)
    }

    /// Log in with `password`, storing the token on the session and
    /// refreshing the username from `whoami`.
    pub async fn login(&mut self, password: &str) -> Result<()> {
        let request = AuthRequest {
            username: self.session.username.clone(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.api_url("/auth"))
            .json(&request)
            .send()
            .await
            .context("Failed to reach auth endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Authentication failed ({status}): {}", body.trim());
        }

        let body = response.text().await.context("Failed to read auth reply")?;
        if body.trim() == "Invalid Credentials" {
            anyhow::bail!("Invalid credentials");
        }

        let reply: AuthReply =
            serde_json::from_str(&body).context("Failed to parse auth reply")?;
        self.session.token = reply.token;

        // The pod knows the canonical spelling of the username.
        self.session.username = self.whoami().await?;
        tracing::info!(username = %self.session.username, "logged in");

        Ok(())
    }

    /// Ask the pod who the token belongs to.
    pub async fn whoami(&self) -> Result<String> {
        let response = self
            .client
            .get(self.api_url("/whoami"))
            .header("Token", &self.session.token)
            .send()
            .await
            .context("Failed to reach whoami endpoint")?;

        let reply: WhoamiReply = response
            .json()
            .await
            .context("Failed to parse whoami reply")?;

        Ok(reply.username)
    }

    /// Fetch the raw JSON payload for a named timeline. Decoding is the
    /// caller's job (see [`crate::pipeline::decode`]).
    pub async fn fetch_timeline(&self, name: TimelineName) -> Result<String> {
        let response = self
            .client
            .post(self.api_url(&format!("/{}", name.name())))
            .header("Token", &self.session.token)
            .body("{}")
            .send()
            .await
            .with_context(|| format!("Failed to fetch {name} timeline"))?;

        if !response.status().is_success() {
            anyhow::bail!("Pod returned {} for {name} timeline", response.status());
        }

        response
            .text()
            .await
            .context("Failed to read timeline payload")
    }

    /// Post a new status.
    pub async fn post_status(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.api_url("/post"))
            .header("Token", &self.session.token)
            .json(&PostStatusRequest {
                text: text.to_string(),
            })
            .send()
            .await
            .context("Failed to post status")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Pod error {status}: {body}");
        }

        Ok(())
    }

    /// Execute a fetch plan against `store`: download every `Fetch` entry
    /// and write it under its cache filename.
    ///
    /// Failures are non-fatal and there are no retries; a failed download
    /// just leaves the file absent and is returned for the caller to log
    /// or display. Overlapping executions for the same filename are not
    /// locked against each other; last writer wins.
    pub async fn fetch_assets(
        &self,
        store: &dyn FileStore,
        plan: &[AssetFetch],
    ) -> Vec<AssetUnavailable> {
        let mut failures = Vec::new();

        for asset in plan {
            if asset.decision == FetchDecision::Skip {
                tracing::debug!(file = %asset.local_filename, "asset already cached");
                continue;
            }

            let target = store.resolve(&asset.local_filename);
            match self.download_file(&asset.remote_url, &target).await {
                Ok(()) => {
                    tracing::debug!(file = %asset.local_filename, "asset downloaded");
                }
                Err(err) => {
                    tracing::warn!(
                        url = %asset.remote_url,
                        file = %asset.local_filename,
                        "asset fetch failed: {err:#}"
                    );
                    failures.push(AssetUnavailable {
                        remote_url: asset.remote_url.clone(),
                        local_filename: asset.local_filename.clone(),
                        reason: format!("{err:#}"),
                    });
                }
            }
        }

        failures
    }

    /// Download one URL to a local path.
    async fn download_file(&self, url: &str, target: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {}", response.status());
        }

        let bytes = response.bytes().await.context("Failed to read body")?;
        tokio::fs::write(target, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", target.display()))?;

        Ok(())
    }

    /// Upload a media file and wait for the pod to process it. Returns the
    /// markdown image snippet (`![](uri) `) to append to a draft status.
    pub async fn upload_media(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("media_file", part);

        let response = self
            .client
            .post(self.api_url("/upload"))
            .header("Token", &self.session.token)
            .multipart(form)
            .send()
            .await
            .context("Failed to upload media")?;

        if !response.status().is_success() {
            anyhow::bail!("Upload failed with {}", response.status());
        }

        let reply: UploadReply = response
            .json()
            .await
            .context("Failed to parse upload reply")?;

        self.poll_task(&reply.path).await
    }

    /// Poll a media task URL until the pod reports it complete.
    async fn poll_task(&self, task_url: &str) -> Result<String> {
        for _ in 0..TASK_POLL_LIMIT {
            let reply: TaskReply = self
                .client
                .get(task_url)
                .send()
                .await
                .context("Failed to check media task")?
                .json()
                .await
                .context("Failed to parse media task reply")?;

            if !reply.error.is_empty() {
                anyhow::bail!("Media task failed: {}", reply.error);
            }

            if reply.state == "complete" {
                let media_uri = reply
                    .data
                    .map(|d| d.media_uri)
                    .context("Media task completed without a mediaURI")?;
                return Ok(format!("![]({media_uri}) "));
            }

            tracing::debug!(state = %reply.state, "media task not complete yet");
            tokio::time::sleep(TASK_POLL_INTERVAL).await;
        }

        anyhow::bail!("Media task did not complete in time")
    }
}

// ==================== API Types ====================

#[derive(Debug, Serialize)]
struct AuthRequest {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct AuthReply {
    token: String,
}

#[derive(Debug, Deserialize)]
struct WhoamiReply {
    username: String,
}

#[derive(Debug, Serialize)]
struct PostStatusRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    #[serde(rename = "Path")]
    path: String,
}

#[derive(Debug, Deserialize)]
struct TaskReply {
    state: String,
    #[serde(default)]
    error: String,
    data: Option<TaskData>,
}

#[derive(Debug, Deserialize)]
struct TaskData {
    #[serde(rename = "mediaURI")]
    media_uri: String,
}
