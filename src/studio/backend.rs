//! How the form reaches the two proxies: over HTTP against a running server,
//! or in-process against the same handler logic.

use async_trait::async_trait;
use std::time::Duration;

use super::server::{self, AppState, SCRIPT_ROUTE, VOICE_ROUTE};
use super::types::StudioError;
use super::wire::{ScriptRequest, ScriptResponse, VoiceRequest, VoiceResponse};

#[async_trait]
pub trait PodcastBackend: Send + Sync {
    async fn generate_script(&self, req: &ScriptRequest) -> Result<ScriptResponse, StudioError>;
    async fn generate_voice(&self, req: &VoiceRequest) -> Result<VoiceResponse, StudioError>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StudioError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(StudioError::Parse("server base url is required".to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, route: &str, body: &B) -> Result<R, StudioError>
    where
        B: serde::Serialize + Sync,
        R: serde::de::DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, route))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        // Status is not inspected: the server always answers 200 and
        // `success` is authoritative.
        Ok(response.json().await?)
    }
}

#[async_trait]
impl PodcastBackend for HttpBackend {
    async fn generate_script(&self, req: &ScriptRequest) -> Result<ScriptResponse, StudioError> {
        self.post(SCRIPT_ROUTE, req).await
    }

    async fn generate_voice(&self, req: &VoiceRequest) -> Result<VoiceResponse, StudioError> {
        self.post(VOICE_ROUTE, req).await
    }
}

/// Runs the proxy logic directly, no socket in between.
pub struct InProcessBackend {
    state: AppState,
}

impl InProcessBackend {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl PodcastBackend for InProcessBackend {
    async fn generate_script(&self, req: &ScriptRequest) -> Result<ScriptResponse, StudioError> {
        Ok(server::proxy_script(&self.state, req).await)
    }

    async fn generate_voice(&self, req: &VoiceRequest) -> Result<VoiceResponse, StudioError> {
        Ok(server::proxy_voice(&self.state, req.clone()).await)
    }
}
