use std::env;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// Notes API endpoint to fetch vocabulary entries from
    pub endpoint: String,
    /// Session cookie required by the notes API
    pub cookie: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Retry ceiling for transient request failures
    pub max_retries: u32,
    /// UI language sent as a query parameter
    pub language: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl ApiConfig {
    pub fn new() -> Self {
        let endpoint = env::var("LEXIKA_API_ENDPOINT")
            .unwrap_or_else(|_| "https://www.doubao.com/samantha/word_notes/get".to_string());

        let cookie = env::var("LEXIKA_API_COOKIE").unwrap_or_default();

        let timeout_seconds = env::var("LEXIKA_API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let max_retries = env::var("LEXIKA_API_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let language = env::var("LEXIKA_LANGUAGE").unwrap_or_else(|_| "zh".to_string());
        let source_lang = env::var("LEXIKA_SOURCE_LANG").unwrap_or_else(|_| "en".to_string());
        let target_lang = env::var("LEXIKA_TARGET_LANG").unwrap_or_else(|_| "zh".to_string());

        Self {
            endpoint,
            cookie,
            timeout_seconds,
            max_retries,
            language,
            source_lang,
            target_lang,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}
