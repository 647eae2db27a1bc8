use async_trait::async_trait;
use lexika_types::{NoteFields, WordRecord};
use thiserror::Error;

/// What flows between pipeline stages. Stages declare which variant they
/// accept; handing a stage the wrong one is a stage-level contract
/// violation, not a per-record failure.
#[derive(Debug, Clone)]
pub enum PipelineData {
    Records(Vec<WordRecord>),
    Notes(Vec<NoteFields>),
}

impl PipelineData {
    pub fn len(&self) -> usize {
        match self {
            PipelineData::Records(records) => records.len(),
            PipelineData::Notes(notes) => notes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_records(self) -> Option<Vec<WordRecord>> {
        match self {
            PipelineData::Records(records) => Some(records),
            PipelineData::Notes(_) => None,
        }
    }

    pub fn into_notes(self) -> Option<Vec<NoteFields>> {
        match self {
            PipelineData::Notes(notes) => Some(notes),
            PipelineData::Records(_) => None,
        }
    }
}

/// A stage itself is broken, as opposed to one record failing inside it.
/// The pipeline never swallows these.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("stage '{stage}' expected {expected} as input")]
    InvalidInput {
        stage: &'static str,
        expected: &'static str,
    },
}

/// One pipeline transformation unit. Stages swallow record-scoped failures
/// internally and only return an error when the stage contract itself is
/// violated.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Stage name for logging
    fn name(&self) -> &str;

    async fn process(&self, data: PipelineData) -> Result<PipelineData, StageError>;
}
