use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ui::settings::UiSettings;

pub const APP_DIR: &str = "campus_hub";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Only ever read from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub media_model: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            text_model: "gemini-2.0-flash".into(),
            media_model: "gemini-2.0-flash-exp-image-generation".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Most recent turns replayed to the model. `None` replays everything.
    pub history_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub chat: ChatConfig,
    pub ui: UiSettings,
}

pub fn config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push("config.json");
    path
}

impl AppConfig {
    /// Optional config file, then `.env`, then process environment.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let path = config_path();
        let mut config = Self::from_file(&path)?;
        config.apply_env(|key| std::env::var(key).ok());

        info!(
            path = %path.display(),
            has_key = config.gateway.api_key.is_some(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// A missing file yields defaults; a malformed one is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("VITE_GEMINI_API_KEY")) {
            self.gateway.api_key = Some(key.trim().to_string());
        }
        if let Some(url) = non_empty("HUBAI_BASE_URL") {
            self.gateway.base_url = url;
        }
        if let Some(model) = non_empty("HUBAI_TEXT_MODEL") {
            self.gateway.text_model = model;
        }
        if let Some(model) = non_empty("HUBAI_MEDIA_MODEL") {
            self.gateway.media_model = model;
        }
        if let Some(limit) = non_empty("HUBAI_CHAT_HISTORY_LIMIT") {
            match limit.trim().parse::<usize>() {
                Ok(n) => self.chat.history_limit = Some(n),
                Err(_) => warn!(value = %limit, "ignoring invalid HUBAI_CHAT_HISTORY_LIMIT"),
            }
        }
    }
}
