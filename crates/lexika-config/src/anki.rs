use std::collections::HashMap;
use std::env;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct AnkiConfig {
    /// AnkiConnect URL
    pub connect_url: String,
    /// Default deck name
    pub deck_name: String,
    /// Default note model name
    pub model_name: String,
    /// Card field name -> record attribute name, empty uses the built-in table
    pub field_mappings: HashMap<String, String>,
}

impl AnkiConfig {
    pub fn new() -> Self {
        let connect_url = env::var("LEXIKA_ANKI_CONNECT_URL")
            .unwrap_or_else(|_| "http://localhost:8765".to_string());

        let deck_name =
            env::var("LEXIKA_ANKI_DECK").unwrap_or_else(|_| "Vocabulary".to_string());

        let model_name = env::var("LEXIKA_ANKI_MODEL").unwrap_or_else(|_| "Basic".to_string());

        let field_mappings = env::var("LEXIKA_ANKI_FIELD_MAPPINGS")
            .map(|v| parse_field_mappings(&v))
            .unwrap_or_default();

        Self {
            connect_url,
            deck_name,
            model_name,
            field_mappings,
        }
    }
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `Field=attribute` pairs separated by commas, e.g.
/// `Front=word,Back=translate`. Pairs without a `=` are ignored.
fn parse_field_mappings(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(field, attribute)| (field.trim().to_string(), attribute.trim().to_string()))
        .filter(|(field, attribute)| !field.is_empty() && !attribute.is_empty())
        .collect()
}
