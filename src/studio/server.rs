//! HTTP surface: the two proxy endpoints plus the speaker catalog.
//!
//! Both proxies answer 200 no matter what happened; callers branch on the
//! `success` field of the body.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use super::botnoi::BotnoiClient;
use super::gemini::GeminiClient;
use super::speakers;
use super::types::{ApiConfig, StudioError};
use super::wire::{ScriptRequest, ScriptResponse, SpeakerInfo, VoiceRequest, VoiceResponse};

pub const SCRIPT_ROUTE: &str = "/api/generate-script";
pub const VOICE_ROUTE: &str = "/api/generate-voice";
pub const SPEAKERS_ROUTE: &str = "/api/speakers";

const SCRIPT_FALLBACK: &str = "Failed to generate script";
const VOICE_FALLBACK: &str = "Failed to generate voice";

#[derive(Clone)]
pub struct AppState {
    http: reqwest::Client,
    config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Result<Self, StudioError> {
        let http = reqwest::Client::builder()
            .timeout(config.endpoints.timeout)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(SCRIPT_ROUTE, post(generate_script))
        .route(VOICE_ROUTE, post(generate_voice))
        .route(SPEAKERS_ROUTE, get(list_speakers))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "podcast studio listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn generate_script(State(state): State<AppState>, body: Bytes) -> Json<ScriptResponse> {
    let response = match parse_body::<ScriptRequest>(&body) {
        Ok(req) => proxy_script(&state, &req).await,
        Err(e) => {
            error!("Error generating script: {e}");
            ScriptResponse::failed(e.client_message(SCRIPT_FALLBACK))
        }
    };
    Json(response)
}

async fn generate_voice(State(state): State<AppState>, body: Bytes) -> Json<VoiceResponse> {
    let response = match parse_body::<VoiceRequest>(&body) {
        Ok(req) => proxy_voice(&state, req).await,
        Err(e) => {
            error!("Error generating voice: {e}");
            VoiceResponse::failed(e.client_message(VOICE_FALLBACK))
        }
    };
    Json(response)
}

async fn list_speakers() -> Json<Vec<SpeakerInfo>> {
    Json(speakers::catalog())
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, StudioError> {
    serde_json::from_slice(body).map_err(|e| StudioError::Parse(format!("request body: {e}")))
}

/// Script Generation Proxy. Never fails; errors are folded into the body.
pub async fn proxy_script(state: &AppState, req: &ScriptRequest) -> ScriptResponse {
    let result: Result<String, StudioError> = async {
        let client = GeminiClient::new(state.http.clone(), state.config())?;
        client.generate_script(&req.title, &req.prompt).await
    }
    .await;

    match result {
        Ok(script) => {
            info!(script_len = script.len(), "script generated");
            ScriptResponse::ok(script)
        }
        Err(e) => {
            log_failure("script", &e);
            ScriptResponse::failed(e.client_message(SCRIPT_FALLBACK))
        }
    }
}

/// Voice Synthesis Proxy. Never fails; errors are folded into the body.
pub async fn proxy_voice(state: &AppState, req: VoiceRequest) -> VoiceResponse {
    let payload = req.into_payload();
    let result: Result<Option<String>, StudioError> = async {
        let client = BotnoiClient::new(state.http.clone(), state.config())?;
        client.generate_audio(&payload).await
    }
    .await;

    match result {
        Ok(url) => {
            if url.is_none() {
                warn!("voice provider reported success without an audio url");
            }
            VoiceResponse::ok(url)
        }
        Err(e) => {
            log_failure("voice", &e);
            VoiceResponse::failed(e.client_message(VOICE_FALLBACK))
        }
    }
}

fn log_failure(what: &str, e: &StudioError) {
    match e {
        StudioError::MissingCredential { .. } => warn!("Cannot generate {what}: {e}"),
        StudioError::Upstream { .. } => warn!("Provider failed to generate {what}: {e}"),
        StudioError::Http(_) | StudioError::Parse(_) => error!("Error generating {what}: {e}"),
    }
}
