use crate::engine::gateway::GatewayError;
use crate::engine::media_flow::{MediaError, MediaPhase, MediaRequest};
use crate::model::chat::ChatMessage;
use crate::model::content_package::GeneratedPackage;
use crate::model::event_input::{EventInput, ValidationError};
use crate::model::media::MediaResult;

pub enum EngineCommand {
    GeneratePackage(EventInput),
    SendChat {
        message: String,
        history: Vec<ChatMessage>,
    },
    RunMedia(MediaRequest),
    SetApiKey(String),
}

pub enum EngineResponse {
    PackageReady(GeneratedPackage),
    PackageRejected(ValidationError),

    ChatReply(Result<String, GatewayError>),

    MediaProgress(MediaPhase),
    MediaFinished(Result<MediaResult, MediaError>),
}
