use std::sync::LazyLock;

use async_trait::async_trait;
use lexika_config::dictionary::DictionaryConfig;
use lexika_types::{CollinsData, CollinsExample};
use regex::Regex;

use crate::detail::WordDetail;
use crate::error::DictionaryError;
use crate::{DictionaryService, MAX_EXAMPLES};

static PHONETIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="phonetic">\[(.*?)\]</span>"#).unwrap()
});

static TRANS_CONTAINER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="trans-container">(.*?)</div>"#).unwrap()
});

static TRANS_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<li>(.*?)</li>").unwrap());

static EXAMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<p class="example-sentences">(.*?)</p>"#).unwrap()
});

static COLLINS_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div id="authTrans"[^>]*>"#).unwrap());

static COLLINS_TRANS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="collinsMajorTrans">(.*?)</div>"#).unwrap()
});

static COLLINS_EXAMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<p class="examples-sentences">(.*?)</p>.*?<p class="example-via">(.*?)</p>"#,
    )
    .unwrap()
});

/// Youdao web dictionary, scraped from the word page.
///
/// The page has no structured API, so every field comes out of pattern
/// matching against the markup. The markup varies by word; an unmatched
/// pattern yields an absent field, never an error.
pub struct YoudaoDictionary {
    base_url: String,
    user_agent: String,
    client: reqwest::Client,
}

impl YoudaoDictionary {
    pub fn new(config: &DictionaryConfig) -> Self {
        Self {
            base_url: config.youdao_endpoint.clone(),
            user_agent: config.user_agent.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_page(&self, word: &str) -> Result<String, DictionaryError> {
        let url = format!("{}/{}", self.base_url, word);
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
impl DictionaryService for YoudaoDictionary {
    fn name(&self) -> &str {
        "youdao"
    }

    async fn lookup_word(&self, word: &str) -> Result<Option<WordDetail>, DictionaryError> {
        let html = self.fetch_page(word).await?;

        let examples = parse_examples(&html);
        let detail = WordDetail {
            word: word.to_string(),
            phonetic: parse_phonetic(&html),
            definition: parse_definition(&html),
            examples: (!examples.is_empty()).then_some(examples),
            collins: parse_collins(&html),
            additional_info: None,
        };

        Ok(Some(detail))
    }

    async fn get_examples(&self, word: &str) -> Result<Vec<String>, DictionaryError> {
        let html = self.fetch_page(word).await?;
        Ok(parse_examples(&html))
    }
}

fn parse_phonetic(html: &str) -> Option<String> {
    PHONETIC_RE
        .captures(html)
        .map(|c| c[1].trim().to_string())
        .filter(|p| !p.is_empty())
}

fn parse_definition(html: &str) -> Option<String> {
    let container = TRANS_CONTAINER_RE.captures(html)?;
    let defs: Vec<String> = TRANS_ITEM_RE
        .captures_iter(&container[1])
        .map(|c| c[1].trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();
    if defs.is_empty() {
        None
    } else {
        Some(defs.join("\n"))
    }
}

fn parse_examples(html: &str) -> Vec<String> {
    EXAMPLE_RE
        .captures_iter(html)
        .map(|c| c[1].trim().to_string())
        .filter(|e| !e.is_empty())
        .take(MAX_EXAMPLES)
        .collect()
}

/// The Collins section nests divs, so a close-tag match cannot delimit it.
/// Cut at the next `id`-carrying sibling div instead, or the end of the page.
fn collins_section(html: &str) -> Option<&str> {
    let open = COLLINS_OPEN_RE.find(html)?;
    let rest = &html[open.end()..];
    let end = rest.find("<div id=").unwrap_or(rest.len());
    Some(&rest[..end])
}

fn parse_collins(html: &str) -> Option<CollinsData> {
    let section = collins_section(html)?;

    let translations: Vec<String> = COLLINS_TRANS_RE
        .captures_iter(section)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let examples: Vec<CollinsExample> = COLLINS_EXAMPLE_RE
        .captures_iter(section)
        .map(|c| CollinsExample {
            source: c[1].trim().to_string(),
            target: c[2].trim().to_string(),
        })
        .collect();

    if translations.is_empty() && examples.is_empty() {
        None
    } else {
        Some(CollinsData {
            translations,
            examples,
        })
    }
}
