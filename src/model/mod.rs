pub mod chat;
pub mod content_package;
pub mod event_input;
pub mod media;
