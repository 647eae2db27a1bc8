use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single vocabulary entry flowing through the pipeline.
///
/// `word` and `translate` are always present once a record leaves the
/// fetcher; every enrichment field stays absent until a stage fills it in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub source_lang: String,
    pub target_lang: String,
    pub translate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    /// Alternate example list populated by the tabular importer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collins: Option<CollinsData>,
    /// Backend-specific structured notes (part of speech, etymology, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastered: Option<bool>,
}

impl WordRecord {
    pub fn new(word: &str, translate: &str, source_lang: &str, target_lang: &str) -> Self {
        Self {
            word: word.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            translate: translate.to_string(),
            phonetic: None,
            examples: None,
            sentences: None,
            collins: None,
            additional_info: None,
            mastered: None,
        }
    }
}

/// Richer bilingual payload some dictionary backends provide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollinsData {
    #[serde(default)]
    pub translations: Vec<String>,
    #[serde(default)]
    pub examples: Vec<CollinsExample>,
}

/// One paired example sentence inside a Collins payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollinsExample {
    pub source: String,
    pub target: String,
}

/// Rendered card fields, one map per exported note.
pub type NoteFields = HashMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_with_only_required_fields() {
        let json = r#"{
            "word": "hello",
            "source_lang": "en",
            "target_lang": "zh",
            "translate": "你好"
        }"#;
        let record: WordRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.word, "hello");
        assert_eq!(record.translate, "你好");
        assert!(record.phonetic.is_none());
        assert!(record.examples.is_none());
        assert!(record.collins.is_none());
        assert!(record.mastered.is_none());
    }
}
