use super::prompts;
use super::types::{ApiConfig, Provider, StudioError, UPSTREAM_DEFAULTS};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl GeminiClient {
    /// Fails with `MissingCredential` before anything touches the network.
    pub fn new(client: reqwest::Client, config: &ApiConfig) -> Result<Self, StudioError> {
        let api_key = config.credentials.key_for(Provider::Gemini)?;

        Ok(Self {
            client,
            api_key,
            url: config.endpoints.gemini_generate_url(),
        })
    }

    pub async fn generate_script(&self, title: &str, prompt: &str) -> Result<String, StudioError> {
        let full_prompt = prompts::script_prompt(title, prompt, UPSTREAM_DEFAULTS.language);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: full_prompt }],
            }],
        };

        debug!(url = %self.url, title_len = title.len(), prompt_len = prompt.len(), "Gemini request");

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        // The provider's status code is not consulted; the body decides.
        let raw: Value = response.json().await?;
        extract_script(&raw)
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a generateContent body.
pub fn extract_script(raw: &Value) -> Result<String, StudioError> {
    let content = raw
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c0| c0.get("content"))
        .filter(|c| !c.is_null());

    let Some(content) = content else {
        error!(body = %raw, "Gemini API returned an error");
        let message = raw
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(|m| m.to_string());
        return Err(StudioError::Upstream { message });
    };

    content
        .get("parts")
        .and_then(|p| p.get(0))
        .and_then(|p0| p0.get("text"))
        .and_then(|t| t.as_str())
        .map(|t| t.to_string())
        .ok_or_else(|| StudioError::Parse("candidate content has no text part".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::studio::types::Credentials;
    use serde_json::json;

    #[test]
    fn first_candidate_text_is_returned_verbatim() {
        let body = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "  วันนี้เราจะมาพูดถึงเรื่อง...\n" }, { "text": "ignored" }] } },
                { "content": { "parts": [{ "text": "second candidate" }] } }
            ]
        });
        assert_eq!(extract_script(&body).unwrap(), "  วันนี้เราจะมาพูดถึงเรื่อง...\n");
    }

    #[test]
    fn missing_candidates_propagate_provider_message() {
        let body = json!({ "error": { "code": 400, "message": "API key not valid" } });
        match extract_script(&body) {
            Err(StudioError::Upstream { message }) => {
                assert_eq!(message.as_deref(), Some("API key not valid"))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_candidates_without_message() {
        let body = json!({ "candidates": [] });
        assert!(matches!(
            extract_script(&body),
            Err(StudioError::Upstream { message: None })
        ));
    }

    #[test]
    fn candidate_without_parts_is_a_parse_error() {
        let body = json!({ "candidates": [{ "content": { "role": "model" } }] });
        assert!(matches!(extract_script(&body), Err(StudioError::Parse(_))));
    }

    #[test]
    fn client_needs_a_key() {
        let config = ApiConfig {
            credentials: Credentials::Fixed {
                gemini: None,
                botnoi: Some("tok".into()),
            },
            ..ApiConfig::default()
        };
        let err = GeminiClient::new(reqwest::Client::new(), &config).err().unwrap();
        assert_eq!(err.to_string(), "Gemini API key not configured");
    }
}
