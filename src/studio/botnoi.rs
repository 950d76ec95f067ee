use super::types::{ApiConfig, Provider, StudioError};
use super::wire::SynthesisPayload;

use serde_json::Value;
use tracing::{debug, info};

pub struct BotnoiClient {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl BotnoiClient {
    /// Fails with `MissingCredential` before anything touches the network.
    pub fn new(client: reqwest::Client, config: &ApiConfig) -> Result<Self, StudioError> {
        let api_key = config.credentials.key_for(Provider::Botnoi)?;

        Ok(Self {
            client,
            api_key,
            url: config.endpoints.botnoi_generate_url(),
        })
    }

    /// Returns the audio URL on success. `Ok(None)` means the provider said
    /// success but handed back no URL.
    pub async fn generate_audio(&self, payload: &SynthesisPayload) -> Result<Option<String>, StudioError> {
        debug!(
            url = %self.url,
            speaker = %payload.speaker,
            text_len = payload.text.len(),
            "Botnoi request"
        );

        let response = self
            .client
            .post(&self.url)
            .header("Botnoi-Token", &self.api_key)
            .header("content-type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let raw: Value = response.json().await?;

        info!(status = status.as_u16(), body = %raw, "Botnoi API response");

        interpret_response(status.is_success(), &raw)
    }
}

pub fn interpret_response(http_ok: bool, raw: &Value) -> Result<Option<String>, StudioError> {
    let succeeded = raw.get("success").map(is_truthy).unwrap_or(false);

    if http_ok && succeeded {
        let url = non_empty_str(raw.get("audio_url")).or_else(|| non_empty_str(raw.get("file_url")));
        return Ok(url);
    }

    Err(StudioError::Upstream {
        message: non_empty_str(raw.get("message")),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
