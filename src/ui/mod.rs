pub mod app;
pub mod chat_widget;
pub mod content_output;
pub mod event_form;
pub mod settings;
pub mod visual_tools;
