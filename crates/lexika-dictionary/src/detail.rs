use std::collections::HashMap;

use lexika_types::CollinsData;

/// Normalized result of one dictionary lookup.
///
/// `word` is the canonical form the backend matched, which may differ in
/// case or variant from the query. Everything else is optional; a backend
/// that found nothing returns no detail at all rather than an empty one.
#[derive(Debug, Clone, Default)]
pub struct WordDetail {
    pub word: String,
    pub phonetic: Option<String>,
    pub definition: Option<String>,
    pub examples: Option<Vec<String>>,
    pub collins: Option<CollinsData>,
    pub additional_info: Option<HashMap<String, String>>,
}

impl WordDetail {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_string(),
            ..Default::default()
        }
    }
}
