use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use lexika_config::dictionary::DictionaryConfig;
use regex::Regex;
use serde::Deserialize;

use crate::detail::WordDetail;
use crate::error::DictionaryError;
use crate::{DictionaryService, MAX_EXAMPLES};

/// Bold heading that opens the etymology section of an entry.
static ETYMOLOGY_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<b>[^<]*词源[^<]*</b>").unwrap());

/// Bold heading that opens the root-memory section of an entry.
static ROOT_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<b>[^<]*词根记忆[^<]*</b>").unwrap());

/// Colored token some entries use instead of a plain part-of-speech prefix.
static FONT_POS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<font color="red">\s*([^<]*?)\s*</font>"#).unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Part-of-speech abbreviations a root-memory gloss may start with.
const POS_TAGS: [&str; 8] = ["n.", "v.", "adj.", "adv.", "int.", "prep.", "pron.", "conj."];

/// One entry of the offline glossary file.
#[derive(Debug, Clone, Deserialize)]
pub struct GlossaryEntry {
    pub headword: String,
    #[serde(default)]
    pub variants: Vec<String>,
    pub definition: String,
}

/// Outcome of parsing one glossary definition. `Raw` is the explicit degrade
/// branch for entries whose markup carries neither known section heading.
#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionParse {
    Structured {
        definition: Option<String>,
        examples: Vec<String>,
        info: HashMap<String, String>,
    },
    Raw {
        text: String,
    },
}

/// Offline glossary backend. The whole file loads once at construction;
/// lookups are a linear scan over the in-memory table, case-insensitive
/// against the headword and every listed variant.
pub struct GlossaryDictionary {
    entries: Vec<GlossaryEntry>,
}

impl GlossaryDictionary {
    pub fn new(config: &DictionaryConfig) -> Result<Self, DictionaryError> {
        let path = config.glossary_path.as_deref().ok_or_else(|| {
            DictionaryError::Config(
                "glossary path not configured, set LEXIKA_GLOSSARY_PATH".to_string(),
            )
        })?;
        Self::load(Path::new(path))
    }

    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        if !path.exists() {
            return Err(DictionaryError::Config(format!(
                "glossary file not found: {}",
                path.display()
            )));
        }

        let json = fs::read_to_string(path)?;
        let entries: Vec<GlossaryEntry> = serde_json::from_str(&json)
            .map_err(|e| DictionaryError::Parse(format!("invalid glossary file: {e}")))?;

        tracing::info!("loaded {} glossary entries from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    #[cfg(test)]
    fn from_entries(entries: Vec<GlossaryEntry>) -> Self {
        Self { entries }
    }

    /// Returns the canonical key form that matched and the raw definition.
    fn find(&self, word: &str) -> Option<(String, String)> {
        let needle = word.to_lowercase();
        for entry in &self.entries {
            if entry.headword.to_lowercase() == needle {
                return Some((entry.headword.clone(), entry.definition.clone()));
            }
            for variant in &entry.variants {
                if variant.to_lowercase() == needle {
                    return Some((variant.clone(), entry.definition.clone()));
                }
            }
        }
        None
    }
}

#[async_trait]
impl DictionaryService for GlossaryDictionary {
    fn name(&self) -> &str {
        "glossary"
    }

    async fn lookup_word(&self, word: &str) -> Result<Option<WordDetail>, DictionaryError> {
        let Some((canonical, raw_def)) = self.find(word) else {
            return Ok(None);
        };

        let detail = match parse_definition(&raw_def) {
            DefinitionParse::Structured {
                definition,
                examples,
                info,
            } => WordDetail {
                word: canonical,
                phonetic: None,
                definition: definition.or_else(|| nonempty(strip_tags(&raw_def))),
                examples: (!examples.is_empty())
                    .then(|| examples.into_iter().take(MAX_EXAMPLES).collect()),
                collins: None,
                additional_info: (!info.is_empty()).then_some(info),
            },
            DefinitionParse::Raw { text } => {
                tracing::warn!("unstructured glossary entry for '{word}', keeping raw text");
                let mut info = HashMap::new();
                info.insert("raw_markup".to_string(), raw_def.clone());
                WordDetail {
                    word: canonical,
                    phonetic: None,
                    definition: Some(text),
                    examples: None,
                    collins: None,
                    additional_info: Some(info),
                }
            }
        };

        Ok(Some(detail))
    }

    async fn get_examples(&self, word: &str) -> Result<Vec<String>, DictionaryError> {
        let detail = self.lookup_word(word).await?;
        Ok(detail.and_then(|d| d.examples).unwrap_or_default())
    }
}

/// Best-effort split of a glossary definition into etymology, part of
/// speech, primary gloss and supplementary examples. Entries without either
/// section heading come back as [`DefinitionParse::Raw`].
pub fn parse_definition(raw: &str) -> DefinitionParse {
    let etymology_heading = ETYMOLOGY_HEADING_RE.find(raw);
    let root_heading = ROOT_HEADING_RE.find(raw);

    if etymology_heading.is_none() && root_heading.is_none() {
        return DefinitionParse::Raw {
            text: raw.to_string(),
        };
    }

    let mut info = HashMap::new();
    let mut examples = Vec::new();
    let mut definition = None;

    if let Some(heading) = etymology_heading {
        let end = root_heading
            .filter(|r| r.start() > heading.end())
            .map(|r| r.start())
            .unwrap_or(raw.len());
        let text = strip_tags(&raw[heading.end()..end]);
        if !text.is_empty() {
            info.insert("etymology".to_string(), text);
        }
    }

    if let Some(heading) = root_heading {
        let section = &raw[heading.end()..];
        let mut root_text = strip_tags(section);

        let mut pos = POS_TAGS
            .iter()
            .find(|p| root_text.starts_with(**p))
            .map(|p| p.to_string());

        if let Some(p) = &pos {
            root_text = root_text[p.len()..].trim().to_string();
        } else if let Some(c) = FONT_POS_RE.captures(section) {
            // colored-font fallback for tags outside the closed set
            let token = c[1].trim().to_string();
            if token.ends_with('.') {
                root_text = root_text.replace(&token, "").trim().to_string();
                pos = Some(token);
            }
        }

        if let Some(p) = pos {
            info.insert("part_of_speech".to_string(), p);
        }

        let mut fragments = root_text
            .split('.')
            .map(str::trim)
            .filter(|f| !f.is_empty());

        if let Some(gloss) = fragments.next() {
            info.insert("word_root".to_string(), gloss.to_string());
            definition = Some(gloss.to_string());
            examples = fragments.map(str::to_string).collect();
        }
    }

    DefinitionParse::Structured {
        definition,
        examples,
        info,
    }
}

fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").trim().to_string()
}

fn nonempty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(headword: &str, variants: &[&str], definition: &str) -> GlossaryEntry {
        GlossaryEntry {
            headword: headword.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
            definition: definition.to_string(),
        }
    }

    #[test]
    fn parses_both_sections() {
        let raw = "<b>词源</b>from Old English<b>词根记忆</b>n. 苹果. An apple a day. Apple pie";
        let DefinitionParse::Structured {
            definition,
            examples,
            info,
        } = parse_definition(raw)
        else {
            panic!("expected structured parse");
        };
        assert_eq!(definition.as_deref(), Some("苹果"));
        assert_eq!(examples, vec!["An apple a day", "Apple pie"]);
        assert_eq!(info.get("etymology").map(String::as_str), Some("from Old English"));
        assert_eq!(info.get("part_of_speech").map(String::as_str), Some("n."));
        assert_eq!(info.get("word_root").map(String::as_str), Some("苹果"));
    }

    #[test]
    fn colored_font_pos_fallback() {
        let raw = r#"<b>词根记忆</b><font color="red">vt.</font> 运输. They transport goods"#;
        let DefinitionParse::Structured {
            definition, info, ..
        } = parse_definition(raw)
        else {
            panic!("expected structured parse");
        };
        assert_eq!(info.get("part_of_speech").map(String::as_str), Some("vt."));
        assert_eq!(definition.as_deref(), Some("运输"));
    }

    #[test]
    fn unmarked_entry_degrades_to_raw() {
        let raw = "plain prose with no section headings";
        assert_eq!(
            parse_definition(raw),
            DefinitionParse::Raw {
                text: raw.to_string()
            }
        );
    }

    #[tokio::test]
    async fn raw_entries_keep_markup_for_diagnostics() {
        let dict = GlossaryDictionary::from_entries(vec![entry(
            "opaque",
            &[],
            "<i>no headings here</i>",
        )]);
        let detail = dict.lookup_word("opaque").await.unwrap().unwrap();
        assert_eq!(detail.definition.as_deref(), Some("<i>no headings here</i>"));
        let info = detail.additional_info.unwrap();
        assert_eq!(
            info.get("raw_markup").map(String::as_str),
            Some("<i>no headings here</i>")
        );
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive_over_variants() {
        let dict = GlossaryDictionary::from_entries(vec![entry(
            "Transport",
            &["transports", "transported"],
            "<b>词根记忆</b>v. 运输",
        )]);

        let by_headword = dict.lookup_word("TRANSPORT").await.unwrap().unwrap();
        assert_eq!(by_headword.word, "Transport");

        let by_variant = dict.lookup_word("Transported").await.unwrap().unwrap();
        assert_eq!(by_variant.word, "transported");

        assert!(dict.lookup_word("missing").await.unwrap().is_none());
    }

    #[test]
    fn construction_requires_a_configured_path() {
        let mut config = lexika_config::dictionary::DictionaryConfig::new();
        config.glossary_path = None;
        assert!(matches!(
            GlossaryDictionary::new(&config),
            Err(DictionaryError::Config(_))
        ));

        config.glossary_path = Some("/definitely/not/here.json".to_string());
        assert!(matches!(
            GlossaryDictionary::new(&config),
            Err(DictionaryError::Config(_))
        ));
    }
}
