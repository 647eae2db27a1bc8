use std::sync::LazyLock;

use async_trait::async_trait;
use lexika_config::dictionary::DictionaryConfig;
use regex::Regex;

use crate::detail::WordDetail;
use crate::error::DictionaryError;
use crate::{DictionaryService, MAX_EXAMPLES};

/// Marker the site embeds in the page body for an unknown word. Its
/// presence is a definitive miss, distinct from a malformed page.
const NOT_FOUND_MARKER: &str = "查不到该词";

static MEANING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div class="exp">(.*?)</div>"#).unwrap());

static SENTENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="sent">.*?<div class="en">(.*?)</div>"#).unwrap()
});

/// RenRen web dictionary. Simpler markup than Youdao, no Collins section.
pub struct RenRenDictionary {
    base_url: String,
    user_agent: String,
    client: reqwest::Client,
}

impl RenRenDictionary {
    pub fn new(config: &DictionaryConfig) -> Self {
        Self {
            base_url: config.renren_endpoint.clone(),
            user_agent: config.user_agent.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_page(&self, word: &str) -> Result<String, DictionaryError> {
        let word = word.replace(' ', "%20");
        let url = format!("{}?w={}", self.base_url, word);
        let html = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "text/html,application/xhtml+xml,application/xml")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }
}

#[async_trait]
impl DictionaryService for RenRenDictionary {
    fn name(&self) -> &str {
        "renren"
    }

    async fn lookup_word(&self, word: &str) -> Result<Option<WordDetail>, DictionaryError> {
        let html = self.fetch_page(word).await?;
        Ok(parse_page(word, &html))
    }

    async fn get_examples(&self, word: &str) -> Result<Vec<String>, DictionaryError> {
        let html = self.fetch_page(word).await?;
        Ok(parse_page(word, &html)
            .and_then(|d| d.examples)
            .unwrap_or_default())
    }
}

/// Best-effort extraction from a fetched page. The not-found marker is a
/// definitive miss; anything else yields a detail whose unmatched fields
/// stay absent.
fn parse_page(word: &str, html: &str) -> Option<WordDetail> {
    if html.contains(NOT_FOUND_MARKER) {
        return None;
    }

    let examples = parse_sentences(html);
    Some(WordDetail {
        word: word.to_string(),
        definition: parse_meanings(html),
        examples: (!examples.is_empty()).then_some(examples),
        ..Default::default()
    })
}

fn parse_meanings(html: &str) -> Option<String> {
    let meanings: Vec<String> = MEANING_RE
        .captures_iter(html)
        .map(|c| c[1].trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();
    if meanings.is_empty() {
        None
    } else {
        Some(meanings.join("\n"))
    }
}

fn parse_sentences(html: &str) -> Vec<String> {
    SENTENCE_RE
        .captures_iter(html)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_EXAMPLES)
        .collect()
}
