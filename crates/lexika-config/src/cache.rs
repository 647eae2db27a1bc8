use std::env;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    /// Skip words that were already exported in a previous run
    pub enabled: bool,
    /// Path to the cache file
    pub file: String,
}

impl CacheConfig {
    pub fn new() -> Self {
        let enabled = env::var("LEXIKA_CACHE_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        let file = env::var("LEXIKA_CACHE_FILE")
            .unwrap_or_else(|_| "word_cache.json".to_string());

        Self { enabled, file }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}
