use thiserror::Error;

use crate::model::chat::ChatMessage;
use crate::model::media::{MediaKind, MediaPayload, SourceImage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },
    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
    #[error("provider returned no media")]
    NoMedia,
}

impl GatewayError {
    /// Configuration problems are raised before any request is sent.
    pub fn is_configuration(&self) -> bool {
        matches!(self, GatewayError::MissingCredential)
    }
}

/// Boundary to the hosted generation service.
///
/// Every call is a single attempt. Implementations keep no conversation
/// state: `chat` callers replay the transcript themselves.
pub trait Gateway: Send + Sync {
    fn has_credential(&self) -> bool;

    /// Replaces the credential for subsequent calls.
    fn set_api_key(&self, key: String);

    fn generate_text(&self, prompt: &str) -> Result<String, GatewayError>;

    fn generate_media(
        &self,
        prompt: &str,
        kind: MediaKind,
        source: Option<&SourceImage>,
    ) -> Result<MediaPayload, GatewayError>;

    fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, GatewayError>;
}
