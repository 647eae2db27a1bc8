use std::env;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct DictionaryConfig {
    /// Youdao web dictionary base URL
    pub youdao_endpoint: String,
    /// RenRen web dictionary base URL
    pub renren_endpoint: String,
    /// Path to a local glossary JSON file, unset disables the backend
    pub glossary_path: Option<String>,
    /// User-Agent sent with scraping requests
    pub user_agent: String,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let youdao_endpoint = env::var("LEXIKA_YOUDAO_ENDPOINT")
            .unwrap_or_else(|_| "https://dict.youdao.com/w".to_string());

        let renren_endpoint = env::var("LEXIKA_RENREN_ENDPOINT")
            .unwrap_or_else(|_| "https://dict.renren.com/search".to_string());

        let glossary_path = env::var("LEXIKA_GLOSSARY_PATH").ok().filter(|p| !p.is_empty());

        let user_agent = env::var("LEXIKA_USER_AGENT").unwrap_or_else(|_| {
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
        });

        Self {
            youdao_endpoint,
            renren_endpoint,
            glossary_path,
            user_agent,
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self::new()
    }
}
