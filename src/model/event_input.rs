use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the user typed into the event form for one generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInput {
    pub event_name: String,
    pub topic: String,
    pub audience: String,
    pub date_location: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("event name is required")]
    MissingName,
    #[error("event topic is required")]
    MissingTopic,
}

impl EventInput {
    pub fn new(event_name: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            topic: topic.into(),
            ..Default::default()
        }
    }

    /// Only name and topic are mandatory; everything else may be blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.event_name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.topic.trim().is_empty() {
            return Err(ValidationError::MissingTopic);
        }
        Ok(())
    }

    /// Optional fields that carry text, paired with their prompt labels.
    pub fn optional_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Hedef Kitle", self.audience.as_str()),
            ("Tarih ve Yer", self.date_location.as_str()),
            ("Özel Notlar", self.notes.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}
