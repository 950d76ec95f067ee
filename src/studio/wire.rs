use serde::{Deserialize, Serialize};

use super::types::UPSTREAM_DEFAULTS;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScriptResponse {
    pub fn ok(script: String) -> Self {
        Self {
            success: true,
            script: Some(script),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            script: None,
            error: Some(error.into()),
        }
    }
}

/// Body accepted by `/api/generate-voice`. Omitted voice parameters are
/// filled from [`UPSTREAM_DEFAULTS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_media: Option<String>,
}

impl VoiceRequest {
    pub fn into_payload(self) -> SynthesisPayload {
        SynthesisPayload {
            text: self.text,
            speaker: self
                .speaker
                .unwrap_or_else(|| UPSTREAM_DEFAULTS.speaker.to_string()),
            volume: self.volume.unwrap_or(UPSTREAM_DEFAULTS.volume),
            speed: self.speed.unwrap_or(UPSTREAM_DEFAULTS.speed),
            type_media: self
                .type_media
                .unwrap_or_else(|| UPSTREAM_DEFAULTS.type_media.to_string()),
            save_file: UPSTREAM_DEFAULTS.save_file,
            language: UPSTREAM_DEFAULTS.language.to_string(),
        }
    }
}

/// What actually goes to the speech provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisPayload {
    pub text: String,
    pub speaker: String,
    pub volume: f64,
    pub speed: f64,
    pub type_media: String,
    pub save_file: bool,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VoiceResponse {
    pub fn ok(audio_url: Option<String>) -> Self {
        Self {
            success: true,
            audio_url,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            audio_url: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerInfo {
    pub id: String,
    pub name: String,
}
