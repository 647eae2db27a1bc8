mod enhancement;
mod field_mapping;
mod middleware;
mod pipeline;

pub use enhancement::{DictionaryEnhancement, EnhancementOptions};
pub use field_mapping::{FieldMapping, MappingError, RecordField};
pub use middleware::{Middleware, PipelineData, StageError};
pub use pipeline::MiddlewarePipeline;

#[cfg(test)]
mod tests;
