use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::api::ApiConfig;
use self::cache::CacheConfig;
use self::dictionary::DictionaryConfig;

pub mod anki;
pub mod api;
pub mod cache;
pub mod dictionary;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub dictionary: DictionaryConfig,
    pub anki: AnkiConfig,
    pub cache: CacheConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            api: ApiConfig::new(),
            dictionary: DictionaryConfig::new(),
            anki: AnkiConfig::new(),
            cache: CacheConfig::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
