use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";
pub const BOTNOI_KEY_ENV: &str = "BOTNOI_API_KEY";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BOTNOI_BASE_URL: &str = "https://api-voice.botnoi.ai";
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    Botnoi,
}

impl Provider {
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::Botnoi => "Botnoi",
        }
    }

    pub fn key_env(&self) -> &'static str {
        match self {
            Provider::Gemini => GEMINI_KEY_ENV,
            Provider::Botnoi => BOTNOI_KEY_ENV,
        }
    }
}

/// Parameters the Voice Synthesis Proxy fills in when the caller omits them,
/// plus the two fields it always forces.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamDefaults {
    pub language: &'static str,
    pub save_file: bool,
    pub speaker: &'static str,
    pub volume: f64,
    pub speed: f64,
    pub type_media: &'static str,
}

pub const UPSTREAM_DEFAULTS: UpstreamDefaults = UpstreamDefaults {
    language: "th",
    save_file: true,
    speaker: "1",
    volume: 1.0,
    speed: 1.0,
    type_media: "mp3",
};

/// Where provider keys come from. `Env` re-reads the process environment on
/// every call so a key exported after startup is picked up.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    #[default]
    Env,
    Fixed {
        gemini: Option<String>,
        botnoi: Option<String>,
    },
}

impl Credentials {
    pub fn key_for(&self, provider: Provider) -> Result<String, StudioError> {
        let raw = match self {
            Credentials::Env => std::env::var(provider.key_env()).ok(),
            Credentials::Fixed { gemini, botnoi } => match provider {
                Provider::Gemini => gemini.clone(),
                Provider::Botnoi => botnoi.clone(),
            },
        };

        raw.and_then(|k| {
            let t = k.trim().to_string();
            if t.is_empty() { None } else { Some(t) }
        })
        .ok_or(StudioError::MissingCredential { provider })
    }
}

#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub botnoi_base_url: String,
    pub timeout: Duration,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            botnoi_base_url: DEFAULT_BOTNOI_BASE_URL.to_string(),
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }
}

impl ProviderEndpoints {
    pub fn gemini_generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.gemini_base_url.trim_end_matches('/'),
            self.gemini_model
        )
    }

    pub fn botnoi_generate_url(&self) -> String {
        format!(
            "{}/openapi/v1/generate_audio",
            self.botnoi_base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    pub endpoints: ProviderEndpoints,
    pub credentials: Credentials,
}

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("{} API key not configured", .provider.display_name())]
    MissingCredential { provider: Provider },

    #[error("Provider reported failure: {}", .message.as_deref().unwrap_or("<no message>"))]
    Upstream { message: Option<String> },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl StudioError {
    /// The string a caller of the proxy endpoints gets to see. Transport and
    /// parse details never leave the server.
    pub fn client_message(&self, fallback: &str) -> String {
        match self {
            StudioError::MissingCredential { .. } => self.to_string(),
            StudioError::Upstream { message } => message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(fallback)
                .to_string(),
            StudioError::Http(_) | StudioError::Parse(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}
