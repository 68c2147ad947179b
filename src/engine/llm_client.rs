use std::sync::RwLock;
use std::time::Duration;

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::engine::gateway::{Gateway, GatewayError};
use crate::engine::prompt_builder::{CHAT_SYSTEM_INSTRUCTION, MARKETING_SYSTEM_INSTRUCTION};
use crate::model::chat::ChatMessage;
use crate::model::media::{MediaKind, MediaPayload, SourceImage};

const DEFAULT_MEDIA_MIME: &str = "image/png";
const MAX_ERROR_BODY_CHARS: usize = 300;

/* =========================
   Wire types
   ========================= */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl Content {
    fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".into()),
            parts,
        }
    }

    fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn image(source: &SourceImage) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: source.mime_type.clone(),
                data: source.data.clone(),
            }),
        }
    }
}

impl GenerateContentResponse {
    fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// All text parts of the first candidate, joined.
    pub fn text(&self) -> String {
        self.parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.parts().iter().find_map(|p| p.inline_data.as_ref())
    }
}

/* =========================
   Client
   ========================= */

/// Gemini `generateContent` over a blocking reqwest client.
/// Callers run it off the UI thread.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    text_model: String,
    media_model: String,
    api_key: RwLock<Option<String>>,
}

impl GeminiClient {
    /// Requests run without a client-side timeout; media generation can
    /// take minutes.
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            media_model: config.media_model.clone(),
            api_key: RwLock::new(config.api_key.clone().filter(|k| !k.trim().is_empty())),
        })
    }

    fn api_key(&self) -> Option<String> {
        self.api_key.read().ok().and_then(|k| k.clone())
    }

    fn post(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let key = self.api_key().ok_or(GatewayError::MissingCredential)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!(model, contents = request.contents.len(), "sending generateContent");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(request)
            .send()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                message: truncate_chars(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

impl Gateway for GeminiClient {
    fn has_credential(&self) -> bool {
        self.api_key().is_some()
    }

    fn set_api_key(&self, key: String) {
        let key = key.trim().to_string();
        if let Ok(mut slot) = self.api_key.write() {
            *slot = (!key.is_empty()).then_some(key);
        }
    }

    fn generate_text(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(MARKETING_SYSTEM_INSTRUCTION)),
            contents: vec![Content::user(vec![Part::text(prompt)])],
            generation_config: None,
        };

        let text = self.post(&self.text_model, &request)?.text();
        info!(chars = text.chars().count(), "text generation succeeded");
        Ok(text)
    }

    fn generate_media(
        &self,
        prompt: &str,
        kind: MediaKind,
        source: Option<&SourceImage>,
    ) -> Result<MediaPayload, GatewayError> {
        let mut parts = Vec::with_capacity(2);
        if let Some(source) = source {
            parts.push(Part::image(source));
        }
        parts.push(Part::text(prompt));

        let request = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::user(parts)],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT".into(), "IMAGE".into()],
            }),
        };

        let response = self.post(&self.media_model, &request)?;

        let Some(inline) = response.first_inline_data() else {
            let text = response.text();
            warn!(
                ?kind,
                text = %truncate_chars(&text, 200),
                "media response carried no inline data"
            );
            return Err(GatewayError::NoMedia);
        };

        let bytes = STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| GatewayError::InvalidResponse(format!("bad inline data: {e}")))?;

        let mime_type = if inline.mime_type.is_empty() {
            DEFAULT_MEDIA_MIME.to_string()
        } else {
            inline.mime_type.clone()
        };

        info!(?kind, %mime_type, bytes = bytes.len(), "media generation succeeded");
        Ok(MediaPayload { mime_type, bytes })
    }

    fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, GatewayError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(CHAT_SYSTEM_INSTRUCTION)),
            contents: chat_contents(message, history),
            generation_config: None,
        };

        Ok(self.post(&self.text_model, &request)?.text())
    }
}

/// Prior turns oldest first, then the new user message.
pub fn chat_contents(message: &str, history: &[ChatMessage]) -> Vec<Content> {
    history
        .iter()
        .map(|m| Content {
            role: Some(m.role.wire_name().to_string()),
            parts: vec![Part::text(m.content.clone())],
        })
        .chain(std::iter::once(Content::user(vec![Part::text(message)])))
        .collect()
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push('…');
    out
}
