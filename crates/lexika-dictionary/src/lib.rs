mod detail;
mod error;
mod glossary;
mod registry;
mod renren;
mod youdao;

pub use detail::WordDetail;
pub use error::{DictionaryError, RegistryError};
pub use glossary::{DefinitionParse, GlossaryDictionary};
pub use registry::DictionaryRegistry;
pub use renren::RenRenDictionary;
pub use youdao::YoudaoDictionary;

use async_trait::async_trait;

/// How many example sentences a backend may hand back per lookup.
pub const MAX_EXAMPLES: usize = 5;

/// One dictionary data source.
///
/// `Ok(None)` is the normal "word not found" outcome; an `Err` is a
/// transport or parse failure that callers degrade to a miss after logging.
/// Implementations never signal "not found" through an error.
#[async_trait]
pub trait DictionaryService: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;

    /// Look up a word, best effort
    async fn lookup_word(&self, word: &str) -> Result<Option<WordDetail>, DictionaryError>;

    /// Example sentences only, capped at [`MAX_EXAMPLES`]
    async fn get_examples(&self, word: &str) -> Result<Vec<String>, DictionaryError>;
}
