//! Content Form: the draft being edited, the voice settings, and the two
//! request lifecycles (script, voice) that are tracked independently.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::backend::PodcastBackend;
use super::speakers;
use super::types::StudioError;
use super::wire::{ScriptRequest, ScriptResponse, SpeakerInfo, VoiceRequest, VoiceResponse};

pub const VOLUME_RANGE: (f64, f64) = (0.1, 1.0);
pub const SPEED_RANGE: (f64, f64) = (0.5, 1.5);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastDraft {
    pub title: String,
    pub prompt: String,
    pub script: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Mp3,
    M4a,
    Wav,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Mp3 => "mp3",
            MediaType::M4a => "m4a",
            MediaType::Wav => "wav",
        }
    }
}

impl FromStr for MediaType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mp3" => Ok(MediaType::Mp3),
            "m4a" => Ok(MediaType::M4a),
            "wav" => Ok(MediaType::Wav),
            other => Err(FormError::UnknownMediaType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Unknown speaker id: {0}")]
    UnknownSpeaker(String),

    #[error("Unsupported media type: {0}")]
    UnknownMediaType(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    speaker_id: String,
    volume: f64,
    speed: f64,
    type_media: MediaType,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            speaker_id: "1".to_string(),
            volume: 0.8,
            speed: 1.0,
            type_media: MediaType::Mp3,
        }
    }
}

impl VoiceConfig {
    pub fn speaker_id(&self) -> &str {
        &self.speaker_id
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn type_media(&self) -> MediaType {
        self.type_media
    }

    /// Only ids from the bundled catalog are selectable.
    pub fn select_speaker(&mut self, id: &str) -> Result<(), FormError> {
        let speaker = speakers::find(id).ok_or_else(|| FormError::UnknownSpeaker(id.to_string()))?;
        self.speaker_id = speaker.id;
        Ok(())
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = clamp_to(volume, VOLUME_RANGE);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = clamp_to(speed, SPEED_RANGE);
    }

    pub fn set_type_media(&mut self, type_media: MediaType) {
        self.type_media = type_media;
    }
}

fn clamp_to(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if value.is_nan() {
        return hi;
    }
    value.clamp(lo, hi)
}

/// A synthesized episode as handed to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAudio {
    pub url: String,
}

#[derive(Debug, Default)]
pub struct ContentForm {
    draft: PodcastDraft,
    voice: VoiceConfig,
    script_busy: bool,
    voice_busy: bool,
}

impl ContentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &PodcastDraft {
        &self.draft
    }

    pub fn title(&self) -> &str {
        &self.draft.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn prompt(&self) -> &str {
        &self.draft.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.draft.prompt = prompt.into();
    }

    pub fn script(&self) -> &str {
        &self.draft.script
    }

    /// Script Display binding: the user's edits replace the script wholesale.
    pub fn edit_script(&mut self, script: impl Into<String>) {
        self.draft.script = script.into();
    }

    /// Script display and voice options are shown once a script exists.
    pub fn shows_script_panel(&self) -> bool {
        !self.draft.script.is_empty()
    }

    pub fn voice(&self) -> &VoiceConfig {
        &self.voice
    }

    pub fn voice_mut(&mut self) -> &mut VoiceConfig {
        &mut self.voice
    }

    pub fn speakers(&self) -> Vec<SpeakerInfo> {
        speakers::catalog()
    }

    pub fn is_script_busy(&self) -> bool {
        self.script_busy
    }

    pub fn is_voice_busy(&self) -> bool {
        self.voice_busy
    }

    /// Enabled state of the "Generate Script" control.
    pub fn can_generate_script(&self) -> bool {
        !self.draft.prompt.trim().is_empty() && !self.script_busy
    }

    /// Enabled state of the "Generate Voice" control.
    pub fn can_generate_voice(&self) -> bool {
        !self.voice_busy
    }

    /// Starts a script request. `None` means nothing should be sent.
    pub fn begin_script(&mut self) -> Option<ScriptRequest> {
        if self.draft.prompt.trim().is_empty() || self.script_busy {
            return None;
        }
        self.script_busy = true;
        Some(ScriptRequest {
            prompt: self.draft.prompt.clone(),
            title: self.draft.title.clone(),
        })
    }

    /// Settles a script request. Returns true when a new script was stored.
    pub fn finish_script(&mut self, result: Result<ScriptResponse, StudioError>) -> bool {
        self.script_busy = false;
        match result {
            Ok(ScriptResponse {
                success: true,
                script: Some(script),
                ..
            }) => {
                info!(script_len = script.len(), "script received");
                self.draft.script = script;
                true
            }
            Ok(resp) => {
                warn!(error = ?resp.error, "Error generating script");
                false
            }
            Err(e) => {
                warn!("Error: {e}");
                false
            }
        }
    }

    /// Starts a voice request. Not gated on the busy flag: only the disabled
    /// control prevents a duplicate submission.
    pub fn begin_voice(&mut self) -> Option<VoiceRequest> {
        if self.draft.script.trim().is_empty() {
            return None;
        }
        self.voice_busy = true;
        Some(VoiceRequest {
            text: self.draft.script.clone(),
            speaker: Some(self.voice.speaker_id.clone()),
            volume: Some(self.voice.volume),
            speed: Some(self.voice.speed),
            type_media: Some(self.voice.type_media.as_str().to_string()),
        })
    }

    /// Settles a voice request. Returns the audio to hand to the player; a
    /// success without a URL yields an empty one, which clears the player.
    pub fn finish_voice(&mut self, result: Result<VoiceResponse, StudioError>) -> Option<GeneratedAudio> {
        self.voice_busy = false;
        match result {
            Ok(VoiceResponse {
                success: true,
                audio_url: Some(url),
                ..
            }) if !url.is_empty() => {
                info!(%url, "voice generated");
                Some(GeneratedAudio { url })
            }
            Ok(VoiceResponse { success: true, .. }) => {
                warn!("voice generated but no audio url was returned");
                Some(GeneratedAudio { url: String::new() })
            }
            Ok(resp) => {
                warn!(error = ?resp.error, "Error generating voice");
                None
            }
            Err(e) => {
                warn!("Error: {e}");
                None
            }
        }
    }

    pub async fn generate_script(&mut self, backend: &dyn PodcastBackend) -> bool {
        let Some(req) = self.begin_script() else {
            return false;
        };
        let result = backend.generate_script(&req).await;
        self.finish_script(result)
    }

    pub async fn generate_voice(&mut self, backend: &dyn PodcastBackend) -> Option<GeneratedAudio> {
        let req = self.begin_voice()?;
        let result = backend.generate_voice(&req).await;
        self.finish_voice(result)
    }
}
