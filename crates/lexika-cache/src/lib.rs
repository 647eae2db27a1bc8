use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use lexika_types::WordRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Default)]
struct CacheData {
    #[serde(default)]
    last_updated: u64,
    #[serde(default)]
    words: Vec<String>,
}

/// Remembers which words were already exported, keyed by the `word` string.
/// An unreadable cache file degrades to an empty cache with a warning; it
/// never blocks a run.
pub struct WordCache {
    path: PathBuf,
    words: HashSet<String>,
}

impl WordCache {
    pub fn load(path: &Path) -> Self {
        let words = match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<CacheData>(&json) {
                Ok(data) => data.words.into_iter().collect(),
                Err(e) => {
                    tracing::warn!("ignoring malformed cache {}: {e}", path.display());
                    HashSet::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                tracing::warn!("failed to read cache {}: {e}", path.display());
                HashSet::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            words,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Records not seen in any previous run, input order preserved.
    pub fn filter_new_words(&self, records: &[WordRecord]) -> Vec<WordRecord> {
        records
            .iter()
            .filter(|r| !self.words.contains(&r.word))
            .cloned()
            .collect()
    }

    /// Persist the union of the cache and the given records.
    pub fn save_cache(&mut self, records: &[WordRecord]) -> Result<(), CacheError> {
        for record in records {
            self.words.insert(record.word.clone());
        }

        let mut words: Vec<String> = self.words.iter().cloned().collect();
        words.sort();

        let data = CacheData {
            last_updated: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            words,
        };

        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&data)?)?;
        Ok(())
    }
}
