use thiserror::Error;
use tracing::warn;

use crate::engine::gateway::GatewayError;
use crate::model::chat::ChatMessage;

pub const GREETING: &str = "Selam! Ben HubAI. Bugün kampüs etkinliğin için neler yapabiliriz? 🚀";
pub const APOLOGY: &str = "Üzgünüm, şu an bağlantıda bir sorun var. Tekrar deneyebilir misin?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("a reply is still pending")]
    Busy,
    #[error("message is empty")]
    EmptyMessage,
}

/// What has to be sent to the gateway for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    /// Transcript before `message`, oldest first.
    pub history: Vec<ChatMessage>,
}

/// In-memory transcript plus the idle / awaiting-response switch.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    state: ChatState,
    history_limit: Option<usize>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ChatSession {
    pub fn new(history_limit: Option<usize>) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            state: ChatState::Idle,
            history_limit,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == ChatState::AwaitingResponse
    }

    /// Appends the user's message and moves to awaiting-response.
    pub fn begin_send(&mut self, text: &str) -> Result<ChatRequest, ChatError> {
        if self.is_awaiting() {
            return Err(ChatError::Busy);
        }
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let history = self.replay_window().to_vec();
        self.messages.push(ChatMessage::user(text));
        self.state = ChatState::AwaitingResponse;

        Ok(ChatRequest {
            message: text.to_string(),
            history,
        })
    }

    /// Settles the pending turn. Errors become the fixed apology.
    pub fn complete(&mut self, reply: Result<String, GatewayError>) {
        if !self.is_awaiting() {
            warn!("chat reply arrived with nothing pending; dropped");
            return;
        }

        let content = match reply {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                APOLOGY.to_string()
            }
        };

        self.messages.push(ChatMessage::assistant(content));
        self.state = ChatState::Idle;
    }

    fn replay_window(&self) -> &[ChatMessage] {
        match self.history_limit {
            Some(limit) if self.messages.len() > limit => {
                &self.messages[self.messages.len() - limit..]
            }
            _ => &self.messages,
        }
    }
}
