use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use lexika_dictionary::{
    DictionaryError, DictionaryRegistry, DictionaryService, RegistryError, WordDetail,
};
use lexika_types::WordRecord;

use crate::{
    DictionaryEnhancement, EnhancementOptions, FieldMapping, Middleware, MiddlewarePipeline,
    PipelineData, StageError,
};

/// Canned backend: `details` answers lookups, anything in `fail_words`
/// errors, everything else is a miss.
struct StubDictionary {
    details: HashMap<String, WordDetail>,
    fail_words: Vec<String>,
}

impl StubDictionary {
    fn new() -> Self {
        Self {
            details: HashMap::new(),
            fail_words: Vec::new(),
        }
    }

    fn with_detail(mut self, word: &str, detail: WordDetail) -> Self {
        self.details.insert(word.to_string(), detail);
        self
    }

    fn failing_on(mut self, word: &str) -> Self {
        self.fail_words.push(word.to_string());
        self
    }
}

#[async_trait]
impl DictionaryService for StubDictionary {
    fn name(&self) -> &str {
        "stub"
    }

    async fn lookup_word(&self, word: &str) -> Result<Option<WordDetail>, DictionaryError> {
        if self.fail_words.iter().any(|w| w == word) {
            return Err(DictionaryError::Parse(format!("stub failure for '{word}'")));
        }
        Ok(self.details.get(word).cloned())
    }

    async fn get_examples(&self, word: &str) -> Result<Vec<String>, DictionaryError> {
        Ok(self
            .details
            .get(word)
            .and_then(|d| d.examples.clone())
            .unwrap_or_default())
    }
}

fn hello_detail() -> WordDetail {
    WordDetail {
        word: "hello".to_string(),
        phonetic: Some("hə'ləʊ".to_string()),
        examples: Some(vec!["Hello, world!".to_string()]),
        ..Default::default()
    }
}

fn records(words: &[(&str, &str)]) -> Vec<WordRecord> {
    words
        .iter()
        .map(|(word, translate)| WordRecord::new(word, translate, "en", "zh"))
        .collect()
}

#[tokio::test]
async fn enhancement_preserves_length_and_order() {
    let stub = StubDictionary::new()
        .with_detail("hello", hello_detail())
        .failing_on("xyz");
    let stage =
        DictionaryEnhancement::with_service(Arc::new(stub), EnhancementOptions::default());

    let input = records(&[("hello", "你好"), ("xyz", "未知"), ("world", "世界")]);
    let output = stage
        .process(PipelineData::Records(input))
        .await
        .unwrap()
        .into_records()
        .unwrap();

    assert_eq!(output.len(), 3);
    assert_eq!(output[0].word, "hello");
    assert_eq!(output[1].word, "xyz");
    assert_eq!(output[2].word, "world");
}

#[tokio::test]
async fn lookup_miss_leaves_record_unchanged() {
    let stage = DictionaryEnhancement::with_service(
        Arc::new(StubDictionary::new()),
        EnhancementOptions::default(),
    );

    let mut input = records(&[("hello", "你好")]);
    input[0].phonetic = Some("prior".to_string());

    let output = stage
        .process(PipelineData::Records(input))
        .await
        .unwrap()
        .into_records()
        .unwrap();

    assert_eq!(output[0].phonetic.as_deref(), Some("prior"));
    assert!(output[0].examples.is_none());
}

#[tokio::test]
async fn lookup_error_is_isolated_per_record() {
    let stub = StubDictionary::new()
        .failing_on("xyz")
        .with_detail("hello", hello_detail());
    let stage =
        DictionaryEnhancement::with_service(Arc::new(stub), EnhancementOptions::default());

    let output = stage
        .process(PipelineData::Records(records(&[
            ("xyz", "未知"),
            ("hello", "你好"),
        ])))
        .await
        .unwrap()
        .into_records()
        .unwrap();

    // the failing record passes through untouched
    assert!(output[0].phonetic.is_none());
    assert!(output[0].examples.is_none());
    // and the run continued to the next record
    assert_eq!(output[1].phonetic.as_deref(), Some("hə'ləʊ"));
}

#[tokio::test]
async fn construction_flags_gate_which_fields_are_copied() {
    let stub = StubDictionary::new().with_detail("hello", hello_detail());
    let stage = DictionaryEnhancement::with_service(
        Arc::new(stub),
        EnhancementOptions {
            include_phonetic: false,
            include_examples: true,
            include_collins: true,
        },
    );

    let output = stage
        .process(PipelineData::Records(records(&[("hello", "你好")])))
        .await
        .unwrap()
        .into_records()
        .unwrap();

    assert!(output[0].phonetic.is_none());
    assert_eq!(
        output[0].examples.as_deref(),
        Some(&["Hello, world!".to_string()][..])
    );
}

#[tokio::test]
async fn enhancement_rejects_note_input() {
    let stage = DictionaryEnhancement::with_service(
        Arc::new(StubDictionary::new()),
        EnhancementOptions::default(),
    );
    let result = stage.process(PipelineData::Notes(Vec::new())).await;
    assert!(matches!(result, Err(StageError::InvalidInput { .. })));
}

#[tokio::test]
async fn unknown_service_falls_back_to_default() {
    let mut config = lexika_config::dictionary::DictionaryConfig::new();
    config.glossary_path = None;
    let registry = DictionaryRegistry::new(&config);

    // does not error, warns and binds the default backend instead
    assert!(
        DictionaryEnhancement::new(&registry, "webster", EnhancementOptions::default()).is_ok()
    );

    // case-insensitive resolution still hits the real backend
    assert!(
        DictionaryEnhancement::new(&registry, "YOUDAO", EnhancementOptions::default()).is_ok()
    );
}

#[tokio::test]
async fn glossary_construction_error_propagates() {
    let mut config = lexika_config::dictionary::DictionaryConfig::new();
    config.glossary_path = Some("/missing/glossary.json".to_string());
    let registry = DictionaryRegistry::new(&config);

    let result =
        DictionaryEnhancement::new(&registry, "glossary", EnhancementOptions::default());
    assert!(matches!(result, Err(RegistryError::Construction(_))));
}

#[tokio::test]
async fn end_to_end_hello_card() {
    let stub = StubDictionary::new().with_detail("hello", hello_detail());
    let pipeline = MiddlewarePipeline::new()
        .add_stage(DictionaryEnhancement::with_service(
            Arc::new(stub),
            EnhancementOptions::default(),
        ))
        .add_stage(FieldMapping::with_defaults());

    let notes = pipeline
        .process(PipelineData::Records(records(&[("hello", "你好")])))
        .await
        .unwrap()
        .into_notes()
        .unwrap();

    assert_eq!(notes.len(), 1);
    let note = &notes[0];
    assert_eq!(note.len(), 4);
    assert_eq!(note.get("Front").map(String::as_str), Some("hello"));
    assert_eq!(note.get("Back").map(String::as_str), Some("你好"));
    assert_eq!(note.get("Phonetic").map(String::as_str), Some("[hə'ləʊ]"));
    assert_eq!(
        note.get("Examples").map(String::as_str),
        Some("1. Hello, world!")
    );
}

#[tokio::test]
async fn end_to_end_failing_lookup_still_produces_a_card() {
    let stub = StubDictionary::new().failing_on("xyz");
    let pipeline = MiddlewarePipeline::new()
        .add_stage(DictionaryEnhancement::with_service(
            Arc::new(stub),
            EnhancementOptions::default(),
        ))
        .add_stage(FieldMapping::with_defaults());

    let notes = pipeline
        .process(PipelineData::Records(records(&[
            ("xyz", "未知"),
            ("next", "下一个"),
        ])))
        .await
        .unwrap()
        .into_notes()
        .unwrap();

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].get("Front").map(String::as_str), Some("xyz"));
    assert!(!notes[0].contains_key("Phonetic"));
    assert!(!notes[0].contains_key("Examples"));
    assert_eq!(notes[1].get("Front").map(String::as_str), Some("next"));
}

#[tokio::test]
async fn field_mapping_never_outgrows_its_input() {
    let mapping = FieldMapping::with_defaults();
    let mut input = records(&[("hello", "你好"), ("", "")]);
    input[1].word.clear();
    input[1].translate.clear();

    let notes = mapping
        .process(PipelineData::Records(input))
        .await
        .unwrap()
        .into_notes()
        .unwrap();

    // the empty record renders nothing and is dropped
    assert_eq!(notes.len(), 1);
    assert!(!notes[0].get("Front").unwrap().is_empty());
    assert!(!notes[0].get("Back").unwrap().is_empty());
}

#[tokio::test]
async fn stage_error_aborts_the_pipeline() {
    let pipeline = MiddlewarePipeline::new()
        .add_stage(FieldMapping::with_defaults())
        // second mapping stage receives notes, which violates its contract
        .add_stage(FieldMapping::with_defaults());

    let result = pipeline
        .process(PipelineData::Records(records(&[("hello", "你好")])))
        .await;

    assert!(matches!(result, Err(StageError::InvalidInput { .. })));
}
