use std::env;

use crate::content::Language;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Runtime configuration, read from the environment (and `.env` via dotenv)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Gemini credential; `None` means demo mode
    pub api_key: Option<String>,
    pub model: String,
    pub language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            language: Language::default(),
        }
    }
}

impl AppConfig {
    /// Loads GEMINI_API_KEY (or API_KEY), GEMINI_MODEL and FOLIO_LANG
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = ["GEMINI_API_KEY", "API_KEY"]
            .into_iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        let model = lookup("GEMINI_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let language = match lookup("FOLIO_LANG") {
            Some(tag) => tag.parse().unwrap_or_else(|e| {
                log::warn!("Ignoring FOLIO_LANG: {}", e);
                Language::default()
            }),
            None => Language::default(),
        };

        Self {
            api_key,
            model,
            language,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
