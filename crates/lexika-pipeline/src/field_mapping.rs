use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use lexika_types::{CollinsData, NoteFields, WordRecord};
use thiserror::Error;

use crate::middleware::{Middleware, PipelineData, StageError};

/// How many example sentences a rendered card carries.
pub const MAX_RENDERED_EXAMPLES: usize = 3;

/// How many Collins example pairs a rendered card carries.
pub const MAX_RENDERED_COLLINS_EXAMPLES: usize = 2;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("card field '{field}' maps to unknown record attribute '{attribute}'")]
    UnknownAttribute { field: String, attribute: String },
}

/// Closed set of record attributes a card field may map to. Resolving the
/// attribute name here, at construction, means a typo fails fast instead of
/// silently producing empty cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Word,
    Translate,
    Phonetic,
    Examples,
    Sentences,
    Collins,
}

impl FromStr for RecordField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "word" => Ok(RecordField::Word),
            "translate" => Ok(RecordField::Translate),
            "phonetic" => Ok(RecordField::Phonetic),
            "examples" => Ok(RecordField::Examples),
            "sentences" => Ok(RecordField::Sentences),
            "collins" => Ok(RecordField::Collins),
            _ => Err(()),
        }
    }
}

/// Renders each record into flat card fields.
///
/// Filtering: a record that yields no renderable field is dropped with a
/// logged reason, so the output may be shorter than the input. Absent or
/// empty attributes are omitted from the card rather than emitted as empty
/// strings.
pub struct FieldMapping {
    mappings: Vec<(String, RecordField)>,
}

impl FieldMapping {
    /// The built-in card layout: Front/Back/Phonetic/Examples/Collins.
    pub fn with_defaults() -> Self {
        Self {
            mappings: vec![
                ("Front".to_string(), RecordField::Word),
                ("Back".to_string(), RecordField::Translate),
                ("Phonetic".to_string(), RecordField::Phonetic),
                ("Examples".to_string(), RecordField::Examples),
                ("Collins".to_string(), RecordField::Collins),
            ],
        }
    }

    /// Build from card field name -> attribute name pairs. An empty table
    /// falls back to the defaults; an unknown attribute is a construction
    /// error.
    pub fn new(field_mappings: &HashMap<String, String>) -> Result<Self, MappingError> {
        if field_mappings.is_empty() {
            return Ok(Self::with_defaults());
        }

        let mut mappings = Vec::with_capacity(field_mappings.len());
        for (field, attribute) in field_mappings {
            let accessor =
                RecordField::from_str(attribute).map_err(|_| MappingError::UnknownAttribute {
                    field: field.clone(),
                    attribute: attribute.clone(),
                })?;
            mappings.push((field.clone(), accessor));
        }
        mappings.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self { mappings })
    }

    fn map_record(&self, record: &WordRecord) -> Option<NoteFields> {
        let mut note = NoteFields::new();

        for (field, accessor) in &self.mappings {
            if let Some(value) = render(*accessor, record) {
                note.insert(field.clone(), value);
            }
        }

        if note.is_empty() { None } else { Some(note) }
    }
}

#[async_trait]
impl Middleware for FieldMapping {
    fn name(&self) -> &str {
        "field-mapping"
    }

    async fn process(&self, data: PipelineData) -> Result<PipelineData, StageError> {
        let Some(records) = data.into_records() else {
            return Err(StageError::InvalidInput {
                stage: "field-mapping",
                expected: "word records",
            });
        };

        let mut notes = Vec::with_capacity(records.len());
        for record in &records {
            match self.map_record(record) {
                Some(note) => notes.push(note),
                None => {
                    tracing::warn!("dropping record '{}': no mappable fields", record.word);
                }
            }
        }

        Ok(PipelineData::Notes(notes))
    }
}

fn render(accessor: RecordField, record: &WordRecord) -> Option<String> {
    match accessor {
        RecordField::Word => nonempty(&record.word),
        RecordField::Translate => nonempty(&record.translate),
        RecordField::Phonetic => record
            .phonetic
            .as_deref()
            .and_then(nonempty)
            .map(|p| format!("[{p}]")),
        RecordField::Examples => record
            .examples
            .as_deref()
            .filter(|e| !e.is_empty())
            .map(format_examples),
        RecordField::Sentences => record
            .sentences
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| s.join("\n")),
        RecordField::Collins => record.collins.as_ref().and_then(format_collins),
    }
}

/// Newline-joined, 1-indexed enumeration of the first few examples.
fn format_examples(examples: &[String]) -> String {
    examples
        .iter()
        .take(MAX_RENDERED_EXAMPLES)
        .enumerate()
        .map(|(i, example)| format!("{}. {}", i + 1, example))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Each translation on its own paragraph, then up to two example pairs as a
/// bullet line with the target sentence indented beneath it.
fn format_collins(collins: &CollinsData) -> Option<String> {
    let mut paragraphs: Vec<String> = collins
        .translations
        .iter()
        .filter(|t| !t.is_empty())
        .cloned()
        .collect();

    for example in collins.examples.iter().take(MAX_RENDERED_COLLINS_EXAMPLES) {
        paragraphs.push(format!("• {}\n  {}", example.source, example.target));
    }

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n\n"))
    }
}

fn nonempty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexika_types::CollinsExample;

    fn record_with_examples(count: usize) -> WordRecord {
        let mut record = WordRecord::new("apple", "苹果", "en", "zh");
        record.examples = Some((1..=count).map(|i| format!("example {i}")).collect());
        record
    }

    #[test]
    fn examples_render_enumerated_and_truncated() {
        for (count, expected) in [
            (0, None),
            (1, Some("1. example 1".to_string())),
            (3, Some("1. example 1\n2. example 2\n3. example 3".to_string())),
            (5, Some("1. example 1\n2. example 2\n3. example 3".to_string())),
        ] {
            let mut record = record_with_examples(count);
            if count == 0 {
                record.examples = Some(Vec::new());
            }
            assert_eq!(render(RecordField::Examples, &record), expected, "count {count}");
        }
    }

    #[test]
    fn collins_renders_at_most_two_example_pairs() {
        let collins = CollinsData {
            translations: vec!["a round fruit".to_string()],
            examples: (1..=4)
                .map(|i| CollinsExample {
                    source: format!("sentence {i}"),
                    target: format!("翻译 {i}"),
                })
                .collect(),
        };
        let rendered = format_collins(&collins).unwrap();
        assert_eq!(
            rendered,
            "a round fruit\n\n• sentence 1\n  翻译 1\n\n• sentence 2\n  翻译 2"
        );
    }

    #[test]
    fn empty_collins_is_omitted() {
        assert_eq!(format_collins(&CollinsData::default()), None);
    }

    #[test]
    fn absent_attributes_are_omitted_from_the_card() {
        let record = WordRecord::new("apple", "苹果", "en", "zh");
        let mapping = FieldMapping::with_defaults();
        let note = mapping.map_record(&record).unwrap();
        assert_eq!(note.len(), 2);
        assert_eq!(note.get("Front").map(String::as_str), Some("apple"));
        assert_eq!(note.get("Back").map(String::as_str), Some("苹果"));
        assert!(!note.contains_key("Phonetic"));
        assert!(!note.contains_key("Examples"));
        assert!(!note.contains_key("Collins"));
    }

    #[test]
    fn phonetic_renders_bracketed() {
        let mut record = WordRecord::new("hello", "你好", "en", "zh");
        record.phonetic = Some("hə'ləʊ".to_string());
        assert_eq!(
            render(RecordField::Phonetic, &record),
            Some("[hə'ləʊ]".to_string())
        );
    }

    #[test]
    fn unknown_attribute_fails_at_construction() {
        let mut table = HashMap::new();
        table.insert("Front".to_string(), "word".to_string());
        table.insert("Back".to_string(), "defnition".to_string());
        assert!(matches!(
            FieldMapping::new(&table),
            Err(MappingError::UnknownAttribute { .. })
        ));
    }

    #[test]
    fn empty_table_uses_defaults() {
        let mapping = FieldMapping::new(&HashMap::new()).unwrap();
        assert_eq!(mapping.mappings.len(), 5);
    }

    #[test]
    fn sentences_render_newline_joined() {
        let mut record = WordRecord::new("apple", "苹果", "en", "zh");
        record.sentences = Some(vec!["A.".to_string(), "B.".to_string()]);
        assert_eq!(
            render(RecordField::Sentences, &record),
            Some("A.\nB.".to_string())
        );
    }
}
