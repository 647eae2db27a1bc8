use std::sync::Arc;

use async_trait::async_trait;
use lexika_dictionary::{DictionaryRegistry, DictionaryService, RegistryError};
use lexika_types::WordRecord;

use crate::middleware::{Middleware, PipelineData, StageError};

/// Toggles for which lookup fields get copied onto a record.
#[derive(Debug, Clone, Copy)]
pub struct EnhancementOptions {
    pub include_phonetic: bool,
    pub include_examples: bool,
    pub include_collins: bool,
}

impl Default for EnhancementOptions {
    fn default() -> Self {
        Self {
            include_phonetic: true,
            include_examples: true,
            include_collins: true,
        }
    }
}

/// Enriches each record with dictionary data from one backend.
///
/// Lossless: output has the same length and order as the input. A failed
/// lookup is logged and leaves that record exactly as it came in; it never
/// aborts the batch.
pub struct DictionaryEnhancement {
    dictionary: Arc<dyn DictionaryService>,
    options: EnhancementOptions,
}

impl DictionaryEnhancement {
    /// Resolve the backend through the registry. An unknown service name
    /// downgrades to the default backend with a warning; any other
    /// construction failure propagates.
    pub fn new(
        registry: &DictionaryRegistry,
        service: &str,
        options: EnhancementOptions,
    ) -> Result<Self, RegistryError> {
        let dictionary = match registry.get_service(service) {
            Ok(dictionary) => dictionary,
            Err(RegistryError::UnknownService(name)) => {
                tracing::warn!(
                    "dictionary service '{name}' not found, falling back to '{}'",
                    DictionaryRegistry::DEFAULT_SERVICE
                );
                registry.get_service(DictionaryRegistry::DEFAULT_SERVICE)?
            }
            Err(e) => return Err(e),
        };

        Ok(Self::with_service(dictionary, options))
    }

    /// Bind a concrete backend directly, bypassing the registry.
    pub fn with_service(
        dictionary: Arc<dyn DictionaryService>,
        options: EnhancementOptions,
    ) -> Self {
        Self {
            dictionary,
            options,
        }
    }

    async fn enhance(&self, record: &mut WordRecord) {
        match self.dictionary.lookup_word(&record.word).await {
            Ok(Some(detail)) => {
                if self.options.include_phonetic && detail.phonetic.is_some() {
                    record.phonetic = detail.phonetic;
                }
                if self.options.include_examples && detail.examples.is_some() {
                    record.examples = detail.examples;
                }
                if self.options.include_collins && detail.collins.is_some() {
                    record.collins = detail.collins;
                }
            }
            Ok(None) => {
                tracing::debug!(
                    "no {} entry for '{}'",
                    self.dictionary.name(),
                    record.word
                );
            }
            Err(e) => {
                tracing::warn!(
                    "failed to get {} data for '{}': {e}",
                    self.dictionary.name(),
                    record.word
                );
            }
        }
    }
}

#[async_trait]
impl Middleware for DictionaryEnhancement {
    fn name(&self) -> &str {
        "dictionary-enhancement"
    }

    async fn process(&self, data: PipelineData) -> Result<PipelineData, StageError> {
        let Some(mut records) = data.into_records() else {
            return Err(StageError::InvalidInput {
                stage: "dictionary-enhancement",
                expected: "word records",
            });
        };

        let total = records.len();
        for (i, record) in records.iter_mut().enumerate() {
            tracing::info!("enhancing word {}/{}: {}", i + 1, total, record.word);
            self.enhance(record).await;
        }

        Ok(PipelineData::Records(records))
    }
}
