pub mod engine;
pub mod protocol;

pub mod chat_session;
pub mod content_service;
pub mod credentials;
pub mod fallback;
pub mod gateway;
pub mod llm_client;
pub mod media_flow;
pub mod prompt_builder;
pub mod response_parser;
